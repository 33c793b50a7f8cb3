// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering of the filtered active-agent set.

use csv::{QuoteStyle, WriterBuilder};
use pastoral::ActiveRow;

use crate::error::ApiError;

/// The fixed export header. Column names are part of the contract with the
/// spreadsheets consuming the file.
const EXPORT_HEADER: [&str; 6] = [
    "agent_id",
    "agente_nome",
    "paroquia",
    "pastoral_grupo",
    "funcao_cargo",
    "data_entrada",
];

/// The filename clients receive in the content-disposition header.
pub const EXPORT_FILENAME: &str = "agentes_ativos.csv";

/// Renders the rows as a CSV document, in caller order.
///
/// The output starts with a UTF-8 BOM so spreadsheet applications detect
/// the encoding, and cells are quoted only when they contain a comma,
/// quote or line break.
///
/// # Errors
///
/// Returns `ApiError::Internal` if serialization fails.
pub fn render_csv(rows: &[ActiveRow]) -> Result<Vec<u8>, ApiError> {
    let mut buffer: Vec<u8> = Vec::new();
    buffer.extend_from_slice("\u{feff}".as_bytes());

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(&mut buffer);

    writer
        .write_record(EXPORT_HEADER)
        .map_err(|e| ApiError::Internal {
            message: format!("CSV write failed: {e}"),
        })?;

    for row in rows {
        writer
            .write_record([
                row.agent_id.to_string(),
                row.agent_name.clone(),
                row.parish.name.clone(),
                row.pastoral_group.name.clone(),
                row.role_function.name.clone(),
                row.entry_date.to_string(),
            ])
            .map_err(|e| ApiError::Internal {
                message: format!("CSV write failed: {e}"),
            })?;
    }

    writer.flush().map_err(|e| ApiError::Internal {
        message: format!("CSV write failed: {e}"),
    })?;
    drop(writer);

    Ok(buffer)
}
