use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{LottoError, Result};
use crate::models::{DrawHistory, DrawRecord, Number};

/// Charge un historique CSV (sans en-tête, une ligne par tirage, dernier jeton = complémentaire).
pub fn load_path(path: &Path) -> Result<DrawHistory> {
    if !path.exists() {
        return Err(LottoError::NotFound { path: path.to_path_buf() });
    }
    let file = File::open(path)?;
    let history = load_reader(file)?;
    debug!("{} tirages chargés depuis {:?}", history.len(), path);
    Ok(history)
}

pub fn load_reader<R: Read>(mut source: R) -> Result<DrawHistory> {
    let mut data = Vec::new();
    source.read_to_end(&mut data)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut history = DrawHistory::default();
    let mut record = csv::StringRecord::new();
    // Fin du contenu du tirage précédent et numéro de la ligne où il se termine.
    let mut cursor = 0usize;
    let mut line = 1u64;

    // Le lecteur csv saute les lignes vides : on les repère entre deux enregistrements.
    while reader.read_record(&mut record)? {
        let (start, breaks) = skip_line_breaks(&data, cursor);
        check_no_blank_line(breaks, &history, line)?;
        line += breaks;

        history.push(parse_row(record.iter(), line)?);

        let mut end = reader.position().byte() as usize;
        while end > start && is_line_break(data[end - 1]) {
            end -= 1;
        }
        line += data[start..end].iter().filter(|&&b| b == b'\n').count() as u64;
        cursor = end;
    }

    let (_, breaks) = skip_line_breaks(&data, cursor);
    check_no_blank_line(breaks, &history, line)?;

    Ok(history)
}

fn is_line_break(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Avance sur une suite de fins de ligne (`\r\n` compte pour une).
fn skip_line_breaks(data: &[u8], mut i: usize) -> (usize, u64) {
    let mut breaks = 0;
    while i < data.len() {
        match data[i] {
            b'\r' => {
                i += 1;
                if data.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => i += 1,
            _ => break,
        }
        breaks += 1;
    }
    (i, breaks)
}

/// Une seule fin de ligne entre deux tirages, aucune avant le premier.
fn check_no_blank_line(breaks: u64, history: &DrawHistory, line: u64) -> Result<()> {
    let allowed = if history.is_empty() { 0 } else { 1 };
    if breaks > allowed {
        return Err(LottoError::Parse { line: line + allowed, row: Vec::new() });
    }
    Ok(())
}

/// Variante pour les appelants qui possèdent déjà des lignes découpées en jetons.
pub fn load_rows<I, R, S>(rows: I) -> Result<DrawHistory>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut history = DrawHistory::default();
    for (i, row) in rows.into_iter().enumerate() {
        history.push(parse_row(row, i as u64 + 1)?);
    }
    Ok(history)
}

fn parse_row<I, S>(tokens: I, line: u64) -> Result<DrawRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let row: Vec<String> = tokens.into_iter().map(|t| t.as_ref().to_string()).collect();

    let numbers: Option<Vec<Number>> = row
        .iter()
        .map(|token| token.trim().parse::<Number>().ok())
        .collect();

    match numbers.and_then(|mut n| n.pop().map(|bonus| (n, bonus))) {
        Some((main, bonus)) => Ok(DrawRecord { main, bonus }),
        None => Err(LottoError::Parse { line, row }),
    }
}
