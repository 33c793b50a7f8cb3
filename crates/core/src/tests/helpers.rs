// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures shared by the ledger and report tests.

use crate::{ActiveRow, LookupRef, OpenMovementCommand};
use pastoral_domain::Movement;
use time::Date;
use time::macros::date;

pub fn open_command(agent_id: i64) -> OpenMovementCommand {
    OpenMovementCommand {
        agent_id,
        parish_id: 1,
        pastoral_group_id: 2,
        role_function_id: 3,
        entry_date: String::from("2023-01-10"),
        notes: None,
    }
}

pub fn movement(movement_id: i64, agent_id: i64, entry_date: Date) -> Movement {
    Movement {
        movement_id,
        agent_id,
        parish_id: 1,
        pastoral_group_id: 2,
        role_function_id: 3,
        entry_date,
        exit_date: None,
        notes: None,
        created_at: String::from("2023-01-10T12:00:00Z"),
    }
}

pub fn closed_movement(movement_id: i64, agent_id: i64) -> Movement {
    Movement {
        exit_date: Some(date!(2023 - 02 - 01)),
        ..movement(movement_id, agent_id, date!(2023 - 01 - 10))
    }
}

pub fn active_row(movement_id: i64, agent_name: &str, entry_date: Date) -> ActiveRow {
    ActiveRow {
        movement_id,
        agent_id: movement_id + 100,
        agent_name: agent_name.to_string(),
        parish: LookupRef {
            id: 1,
            name: String::from("Santa Maria"),
        },
        pastoral_group: LookupRef {
            id: 1,
            name: String::from("Catequese"),
        },
        role_function: LookupRef {
            id: 1,
            name: String::from("Coordenador"),
        },
        entry_date,
    }
}

pub fn row_in_parish(movement_id: i64, parish_id: i64, parish_name: &str) -> ActiveRow {
    let mut row: ActiveRow = active_row(movement_id, "Agente", date!(2023 - 01 - 10));
    row.parish = LookupRef {
        id: parish_id,
        name: parish_name.to_string(),
    };
    row
}
