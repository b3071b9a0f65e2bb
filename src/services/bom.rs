//! Bill of materials and physical pattern statistics.

use std::collections::BTreeMap;

use bead_quant::{is_background, BeadColor};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::CostingConfig;
use crate::rendering::{boards_along, BeadGrid};

/// One color in the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BomRow {
    pub code: String,
    /// `#RRGGBB`
    pub hex: String,
    pub count: u64,
    pub bags: u64,
    pub cost: f64,
}

/// Bead counts per code with purchasing totals.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Bom {
    /// Sorted by count, highest first, then by code
    pub rows: Vec<BomRow>,
    pub total_count: u64,
    pub total_bags: u64,
    pub total_cost: f64,
    /// Background cells left out of the counts
    pub excluded: u64,
}

impl Bom {
    /// Count beads per code.
    ///
    /// `bags = ceil(count / beads_per_bag)` and `cost = bags * price_per_bag`.
    /// With `exclude_background`, codes in the background set are skipped and
    /// tallied in [`Bom::excluded`] instead.
    pub fn aggregate<'a>(
        cells: impl IntoIterator<Item = &'a BeadColor>,
        price_per_bag: f64,
        beads_per_bag: u32,
        exclude_background: bool,
    ) -> Self {
        let per_bag = beads_per_bag.max(1) as u64;
        let mut counts: BTreeMap<&str, (u64, &BeadColor)> = BTreeMap::new();
        let mut excluded = 0;

        for bead in cells {
            if exclude_background && is_background(bead.code()) {
                excluded += 1;
                continue;
            }
            counts.entry(bead.code()).or_insert((0, bead)).0 += 1;
        }

        let mut rows: Vec<BomRow> = counts
            .into_iter()
            .map(|(code, (count, bead))| {
                let bags = count.div_ceil(per_bag);
                BomRow {
                    code: code.to_string(),
                    hex: bead.rgb().to_hex(),
                    count,
                    bags,
                    cost: round_cents(bags as f64 * price_per_bag),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));

        let total_count = rows.iter().map(|r| r.count).sum();
        let total_bags = rows.iter().map(|r| r.bags).sum();
        let total_cost = round_cents(rows.iter().map(|r| r.cost).sum());

        Self {
            rows,
            total_count,
            total_bags,
            total_cost,
            excluded,
        }
    }

    /// Aggregate a grid using the configured costing.
    pub fn from_grid(grid: &BeadGrid, costing: &CostingConfig, exclude_background: bool) -> Self {
        Self::aggregate(
            grid.cells(),
            costing.price_per_bag,
            costing.beads_per_bag,
            exclude_background,
        )
    }

    pub fn get(&self, code: &str) -> Option<&BomRow> {
        self.rows.iter().find(|r| r.code == code)
    }

    /// Spreadsheet-friendly CSV: UTF-8 with byte order mark, ending in a TOTAL row.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("\u{FEFF}code,hex,count,bags,cost\n");
        for row in &self.rows {
            out.push_str(&format!(
                "{},{},{},{},{:.2}\n",
                csv_field(&row.code),
                row.hex,
                row.count,
                row.bags,
                row.cost
            ));
        }
        out.push_str(&format!(
            "TOTAL,,{},{},{:.2}\n",
            self.total_count, self.total_bags, self.total_cost
        ));
        out
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Physical size and board layout of a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PatternStats {
    pub width_beads: u32,
    pub height_beads: u32,
    /// Beads counted in the bill of materials
    pub bead_count: u64,
    pub colors: usize,
    pub width_mm: f64,
    pub height_mm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub boards_across: u32,
    pub boards_down: u32,
    pub board_count: u32,
    pub weight_g: f64,
}

impl PatternStats {
    pub fn compute(grid: &BeadGrid, bom: &Bom, costing: &CostingConfig) -> Self {
        let width_mm = grid.width() as f64 * costing.bead_pitch_mm;
        let height_mm = grid.height() as f64 * costing.bead_pitch_mm;
        let boards_across = boards_along(grid.width());
        let boards_down = boards_along(grid.height());
        Self {
            width_beads: grid.width(),
            height_beads: grid.height(),
            bead_count: bom.total_count,
            colors: bom.rows.len(),
            width_mm,
            height_mm,
            width_cm: width_mm / 10.0,
            height_cm: height_mm / 10.0,
            boards_across,
            boards_down,
            board_count: boards_across * boards_down,
            weight_g: bom.total_count as f64 * costing.bead_weight_g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bead_quant::Rgb;
    use pretty_assertions::assert_eq;

    fn bead(code: &'static str, rgb: Rgb) -> BeadColor {
        BeadColor::new(code, rgb)
    }

    #[test]
    fn test_bag_math() {
        let red = bead("R01", Rgb::new(255, 0, 0));
        let cells = vec![red; 2500];
        let bom = Bom::aggregate(&cells, 1.5, 1000, false);
        let row = bom.get("R01").unwrap();
        assert_eq!(row.count, 2500);
        assert_eq!(row.bags, 3);
        assert_eq!(row.cost, 4.5);
        assert_eq!(bom.total_bags, 3);
    }

    #[test]
    fn test_costs_are_whole_cents() {
        let cells = vec![
            bead("A01", Rgb::new(1, 1, 1)),
            bead("B01", Rgb::new(2, 2, 2)),
            bead("C01", Rgb::new(3, 3, 3)),
        ];
        let bom = Bom::aggregate(&cells, 0.1, 1000, false);
        assert_eq!(bom.total_cost, 0.3);
        assert!(bom.rows.iter().all(|r| r.cost == 0.1));

        let json = serde_json::to_value(&bom).unwrap();
        assert_eq!(json["total_cost"], serde_json::json!(0.3));
        assert_eq!(bom.to_csv().lines().last(), Some("TOTAL,,3,3,0.30"));
    }

    #[test]
    fn test_count_conservation_and_order() {
        let a = bead("A01", Rgb::new(1, 1, 1));
        let b = bead("B01", Rgb::new(2, 2, 2));
        let c = bead("C01", Rgb::new(3, 3, 3));
        let cells = vec![a.clone(), b.clone(), b.clone(), c.clone(), c, a];
        let bom = Bom::aggregate(&cells, 1.0, 1000, false);

        assert_eq!(bom.total_count, cells.len() as u64);
        let codes: Vec<&str> = bom.rows.iter().map(|r| r.code.as_str()).collect();
        // Ties sort by code
        assert_eq!(codes, vec!["A01", "B01", "C01"]);
        assert_eq!(bom.rows[0].hex, "#010101");
    }

    #[test]
    fn test_sorted_by_descending_count() {
        let a = bead("A01", Rgb::new(1, 1, 1));
        let z = bead("Z01", Rgb::new(2, 2, 2));
        let cells = vec![a, z.clone(), z];
        let bom = Bom::aggregate(&cells, 1.0, 1000, false);
        assert_eq!(bom.rows[0].code, "Z01");
    }

    #[test]
    fn test_background_exclusion() {
        let white = bead("H01", Rgb::WHITE);
        let red = bead("R01", Rgb::new(255, 0, 0));
        let cells = vec![white.clone(), white, red];

        let all = Bom::aggregate(&cells, 1.0, 1000, false);
        assert_eq!(all.total_count, 3);
        assert_eq!(all.excluded, 0);

        let fg = Bom::aggregate(&cells, 1.0, 1000, true);
        assert_eq!(fg.total_count, 1);
        assert_eq!(fg.excluded, 2);
        assert!(fg.get("H01").is_none());
    }

    #[test]
    fn test_csv_layout() {
        let red = bead("R01", Rgb::new(255, 0, 0));
        let bom = Bom::aggregate(&vec![red; 25], 2.0, 1000, false);
        let csv = bom.to_csv();
        assert!(csv.starts_with('\u{FEFF}'));
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(
            lines,
            vec![
                "code,hex,count,bags,cost",
                "R01,#FF0000,25,1,2.00",
                "TOTAL,,25,1,2.00"
            ]
        );
    }

    #[test]
    fn test_csv_quotes_awkward_codes() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("x\"y"), "\"x\"\"y\"");
        assert_eq!(csv_field("R01"), "R01");
    }

    #[test]
    fn test_stats() {
        let red = bead("R01", Rgb::new(255, 0, 0));
        let grid = BeadGrid::new(58, 30, vec![red; 58 * 30]).unwrap();
        let costing = CostingConfig::default();
        let bom = Bom::from_grid(&grid, &costing, false);
        let stats = PatternStats::compute(&grid, &bom, &costing);

        assert_eq!(stats.bead_count, 1740);
        assert_eq!(stats.colors, 1);
        assert_eq!(stats.width_mm, 290.0);
        assert_eq!(stats.width_cm, 29.0);
        assert_eq!((stats.boards_across, stats.boards_down), (2, 2));
        assert_eq!(stats.board_count, 4);
        assert!((stats.weight_g - 104.4).abs() < 1e-9);
    }
}
