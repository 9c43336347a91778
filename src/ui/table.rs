use tabled::{settings::Style, Table, Tabled};
use crate::query::RankingEntry;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Table")]
    pub label: String,
    #[tabled(rename = "Rows")]
    pub value: String,
}

#[derive(Tabled)]
struct RankingRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Store")]
    store_name: String,
    #[tabled(rename = "Region")]
    region_name: String,
    #[tabled(rename = "Store ID")]
    store_id: i64,
    #[tabled(rename = "Image")]
    image: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            label: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &[(&str, String)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

/// Ranking entries in rank order, one row each
pub fn ranking_table(entries: &[RankingEntry]) -> String {
    let rows: Vec<RankingRow> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| RankingRow {
            rank: i + 1,
            store_name: entry.store_name.clone(),
            region_name: entry.region_name.clone(),
            store_id: entry.store_id,
            image: entry.image.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
