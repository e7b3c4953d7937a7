// src/io/inputs.rs

//! Scripted round inputs ("manual input" played from a file).
//!
//! Bertrand scripts: `round,p1_price,p2_price,p1_investment,p2_investment`
//! Cournot scripts:  `round,q1,q2`

use crate::simulation::error::SimError;
use crate::strategy::traits::PriceDecision;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BertrandScriptRow {
    pub round: usize,
    pub p1_price: f64,
    pub p2_price: f64,
    pub p1_investment: f64,
    pub p2_investment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CournotScriptRow {
    pub round: usize,
    pub q1: u32,
    pub q2: u32,
}

trait Numbered {
    fn round(&self) -> usize;
}

impl Numbered for BertrandScriptRow {
    fn round(&self) -> usize {
        self.round
    }
}

impl Numbered for CournotScriptRow {
    fn round(&self) -> usize {
        self.round
    }
}

fn read_rows<R, T>(reader: R) -> Result<Vec<T>, SimError>
where
    R: Read,
    T: for<'de> Deserialize<'de> + Numbered,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        let row: T = record?;
        // Rounds must be listed in playing order: 1, 2, 3, ...
        let expected = rows.len() + 1;
        if row.round() != expected {
            return Err(SimError::InvalidScript(format!(
                "expected round {}, found round {}",
                expected,
                row.round()
            )));
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(SimError::InvalidScript("script has no rounds".into()));
    }
    Ok(rows)
}

pub fn read_bertrand_script<R: Read>(reader: R) -> Result<Vec<BertrandScriptRow>, SimError> {
    read_rows(reader)
}

pub fn read_cournot_script<R: Read>(reader: R) -> Result<Vec<CournotScriptRow>, SimError> {
    read_rows(reader)
}

pub fn load_bertrand_script(path: &Path) -> Result<Vec<BertrandScriptRow>, SimError> {
    let rows = read_bertrand_script(File::open(path)?)?;
    info!(rounds = rows.len(), path = %path.display(), "loaded bertrand script");
    Ok(rows)
}

pub fn load_cournot_script(path: &Path) -> Result<Vec<CournotScriptRow>, SimError> {
    let rows = read_cournot_script(File::open(path)?)?;
    info!(rounds = rows.len(), path = %path.display(), "loaded cournot script");
    Ok(rows)
}

/// Splits a Bertrand script into the two players' move lists.
pub fn split_bertrand_script(rows: &[BertrandScriptRow]) -> [Vec<PriceDecision>; 2] {
    let p1 = rows
        .iter()
        .map(|r| PriceDecision {
            price: r.p1_price,
            investment: r.p1_investment,
        })
        .collect();
    let p2 = rows
        .iter()
        .map(|r| PriceDecision {
            price: r.p2_price,
            investment: r.p2_investment,
        })
        .collect();
    [p1, p2]
}

pub fn split_cournot_script(rows: &[CournotScriptRow]) -> [Vec<u32>; 2] {
    [
        rows.iter().map(|r| r.q1).collect(),
        rows.iter().map(|r| r.q2).collect(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bertrand_script() {
        let raw = "round, p1_price, p2_price, p1_investment, p2_investment\n\
                   1, 100.0, 90.0, 0, 0\n\
                   2, 95.5, 95.5, 10, 250.5\n";
        let rows = read_bertrand_script(raw.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].p2_investment, 250.5);

        let [p1, p2] = split_bertrand_script(&rows);
        assert_eq!(
            p1[0],
            PriceDecision {
                price: 100.0,
                investment: 0.0
            }
        );
        assert_eq!(p2[1].price, 95.5);
    }

    #[test]
    fn parses_cournot_script() {
        let raw = "round,q1,q2\n1,5,5\n2,3,7\n";
        let rows = read_cournot_script(raw.as_bytes()).unwrap();
        assert_eq!(split_cournot_script(&rows), [vec![5, 3], vec![5, 7]]);
    }

    #[test]
    fn rejects_out_of_order_rounds() {
        let raw = "round,q1,q2\n1,5,5\n3,3,7\n";
        assert!(matches!(
            read_cournot_script(raw.as_bytes()),
            Err(SimError::InvalidScript(_))
        ));
    }

    #[test]
    fn rejects_empty_and_malformed_scripts() {
        assert!(matches!(
            read_cournot_script("round,q1,q2\n".as_bytes()),
            Err(SimError::InvalidScript(_))
        ));
        // Negative cups cannot be produced
        assert!(matches!(
            read_cournot_script("round,q1,q2\n1,-1,5\n".as_bytes()),
            Err(SimError::Csv(_))
        ));
    }
}
