use crate::error::AnalysisError;
use csv::{ReaderBuilder, StringRecord};
use shared::models::{EducationLevel, TransferRecord};
use std::path::Path;

const STATE_COLUMN: &str = "Sigla_uf";
const MUNICIPALITY_COLUMN: &str = "Nome_municipio";
const ENTITY_COLUMN: &str = "Entidade_executora";
const DELIMITER_CANDIDATES: [u8; 4] = [b';', b',', b'\t', b'|'];

/// Header positions resolved once per file.
struct ColumnIndex {
    state: usize,
    municipality: usize,
    entity: Option<usize>,
    levels: [usize; 3],
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, AnalysisError> {
        let required = |name: &str| {
            PnateCsvParser::position(headers, name).ok_or_else(|| {
                AnalysisError::CsvDataFormatError(format!("Missing required column '{}'", name))
            })
        };

        let entity = PnateCsvParser::position(headers, ENTITY_COLUMN);
        if entity.is_none() {
            tracing::warn!(column = ENTITY_COLUMN, "Column not found, no executing entity will be excluded");
        }

        Ok(ColumnIndex {
            state: required(STATE_COLUMN)?,
            municipality: required(MUNICIPALITY_COLUMN)?,
            entity,
            levels: [
                required(EducationLevel::Infantile.column_name())?,
                required(EducationLevel::Fundamental.column_name())?,
                required(EducationLevel::Secondary.column_name())?,
            ],
        })
    }
}

pub struct PnateCsvParser;

impl PnateCsvParser {
    // CSV Header: Sigla_uf;Nome_municipio;Entidade_executora;Prev_ed_infantil;Prev_ens_fundamental;Prev_ens_medio
    // Example Row: SP;CAMPINAS;PREFEITURA MUNICIPAL DE CAMPINAS;R$ 8.852.407,34;R$ 1.204,00;R$ 0,00
    pub fn load_records(path: &Path, delimiter: Option<char>) -> Result<Vec<TransferRecord>, AnalysisError> {
        if !path.exists() {
            return Err(AnalysisError::MissingFile { path: path.to_path_buf() });
        }
        let bytes = std::fs::read(path)?;
        let text = Self::decode(&bytes);
        let delimiter = match delimiter {
            Some(c) => c as u8,
            None => Self::sniff_delimiter(&text),
        };
        tracing::debug!(path = %path.display(), delimiter = %(delimiter as char), "Reading transfers CSV");
        Self::parse_records(&text, delimiter)
    }

    pub fn parse_records(text: &str, delimiter: u8) -> Result<Vec<TransferRecord>, AnalysisError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: StringRecord = rdr.headers()?.iter().map(str::trim).collect();
        let columns = ColumnIndex::resolve(&headers)?;

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result?;
            let field = |pos: usize| row.get(pos).unwrap_or("").to_string();

            records.push(TransferRecord {
                state_code: field(columns.state).trim().to_uppercase(),
                municipality: field(columns.municipality),
                executing_entity: columns.entity.map(|pos| field(pos)),
                infantile: field(columns.levels[0]),
                fundamental: field(columns.levels[1]),
                secondary: field(columns.levels[2]),
            });
        }
        Ok(records)
    }

    /// UTF-8 when valid, Latin-1 otherwise (the format the transfers file is published in).
    fn decode(bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(text) => text.trim_start_matches('\u{feff}').to_string(),
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        }
    }

    /// Picks the candidate that occurs most often in the header line.
    fn sniff_delimiter(text: &str) -> u8 {
        let header = text.lines().next().unwrap_or("");
        DELIMITER_CANDIDATES
            .iter()
            .copied()
            .map(|d| (d, header.bytes().filter(|&b| b == d).count()))
            .filter(|&(_, count)| count > 0)
            .max_by_key(|&(_, count)| count)
            .map(|(d, _)| d)
            .unwrap_or(b',')
    }

    fn position(headers: &StringRecord, name: &str) -> Option<usize> {
        headers.iter().position(|header| header == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_load_records_semicolon_file() {
        let csv_content = "\
 Sigla_uf ;Nome_municipio;Entidade_executora;Prev_ed_infantil;Prev_ens_fundamental;Prev_ens_medio
sp ;Campinas;PREFEITURA MUNICIPAL DE CAMPINAS;R$ 8.852.407,34;R$ 1.204,00;R$ 0,00
RJ;Niterói;SECRETARIA DE ESTADO DE EDUCACAO;R$ 100,00;;R$ 5,00
";
        let tmp_file = create_test_csv(csv_content.as_bytes());
        let records = PnateCsvParser::load_records(tmp_file.path(), None).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state_code, "SP");
        assert_eq!(records[0].municipality, "Campinas");
        assert_eq!(records[0].infantile, "R$ 8.852.407,34");
        assert_eq!(records[1].municipality, "Niterói");
        assert_eq!(records[1].fundamental, "");
        assert_eq!(
            records[1].executing_entity.as_deref(),
            Some("SECRETARIA DE ESTADO DE EDUCACAO")
        );
    }

    #[test]
    fn test_load_records_latin1_fallback() {
        let mut content = b"Sigla_uf;Nome_municipio;Prev_ed_infantil;Prev_ens_fundamental;Prev_ens_medio\nSP;S".to_vec();
        content.push(0xC3); // 'Ã' in Latin-1
        content.extend_from_slice(b"O PAULO;R$ 1,00;R$ 2,00;R$ 3,00\n");
        let tmp_file = create_test_csv(&content);
        let records = PnateCsvParser::load_records(tmp_file.path(), Some(';')).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].municipality, "SÃO PAULO");
        assert_eq!(records[0].executing_entity, None);
    }

    #[test]
    fn test_load_records_comma_delimited_with_quotes() {
        let csv_content = "\
Sigla_uf,Nome_municipio,Entidade_executora,Prev_ed_infantil,Prev_ens_fundamental,Prev_ens_medio
MG,BELO HORIZONTE,PREFEITURA,\"R$ 1.234,56\",\"R$ 0,00\",\"R$ 10,00\"
";
        let tmp_file = create_test_csv(csv_content.as_bytes());
        let records = PnateCsvParser::load_records(tmp_file.path(), None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].infantile, "R$ 1.234,56");
        assert_eq!(records[0].secondary, "R$ 10,00");
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = PnateCsvParser::load_records(Path::new("/nonexistent/PNATE - REPASSES.csv"), None);
        assert!(matches!(result, Err(AnalysisError::MissingFile { .. })));
    }

    #[test]
    fn test_load_records_missing_required_column() {
        let csv_content = "Sigla_uf;Nome_municipio;Prev_ed_infantil;Prev_ens_fundamental\nSP;CAMPINAS;R$ 1,00;R$ 1,00\n";
        let tmp_file = create_test_csv(csv_content.as_bytes());
        let result = PnateCsvParser::load_records(tmp_file.path(), None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Missing required column 'Prev_ens_medio'"));
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(PnateCsvParser::sniff_delimiter("a;b;c\n1;2;3"), b';');
        assert_eq!(PnateCsvParser::sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(PnateCsvParser::sniff_delimiter("single"), b',');
    }
}
