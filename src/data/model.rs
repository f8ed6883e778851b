use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::loader::parse_number;

// ---------------------------------------------------------------------------
// Record – one inventory line item
// ---------------------------------------------------------------------------

/// One row of the inventory CSV.
///
/// Text fields are empty when the source column is absent; numeric fields are
/// 0 when the column is absent or the cell does not parse. Numeric fields are
/// never NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub codigo: String,
    pub clave: String,
    pub desc_prod: String,
    pub inv: f64,
    pub clasificacion: String,
    pub promedio_vta_mes: f64,
    pub cobertura_mes: f64,
    pub cobertura_dias_30: f64,
}

// ---------------------------------------------------------------------------
// Column – explicit schema of the eight known fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
}

/// The known columns, in table display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Codigo,
    Clave,
    DescProd,
    Inv,
    Clasificacion,
    PromedioVtaMes,
    CoberturaMes,
    CoberturaDias30,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Codigo,
        Column::Clave,
        Column::DescProd,
        Column::Inv,
        Column::Clasificacion,
        Column::PromedioVtaMes,
        Column::CoberturaMes,
        Column::CoberturaDias30,
    ];

    /// Header name as it appears (lower-cased) in the CSV.
    pub fn header(self) -> &'static str {
        match self {
            Column::Codigo => "codigo",
            Column::Clave => "clave",
            Column::DescProd => "desc_prod",
            Column::Inv => "inv",
            Column::Clasificacion => "clasificacion",
            Column::PromedioVtaMes => "promedio vta mes",
            Column::CoberturaMes => "cobertura (mes)",
            Column::CoberturaDias30 => "cobertura dias (30)",
        }
    }

    /// Label shown in the table header.
    pub fn label(self) -> &'static str {
        match self {
            Column::Codigo => "Código",
            Column::Clave => "Clave",
            Column::DescProd => "Descripción",
            Column::Inv => "Inv",
            Column::Clasificacion => "Clasif.",
            Column::PromedioVtaMes => "Prom. Vta Mes",
            Column::CoberturaMes => "Cobertura (Mes)",
            Column::CoberturaDias30 => "Cobertura Días (30)",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Inv
            | Column::PromedioVtaMes
            | Column::CoberturaMes
            | Column::CoberturaDias30 => ColumnKind::Numeric,
            Column::Codigo | Column::Clave | Column::DescProd | Column::Clasificacion => {
                ColumnKind::Text
            }
        }
    }

    pub fn is_numeric(self) -> bool {
        self.kind() == ColumnKind::Numeric
    }

    /// Decimal places used when the column is rendered in the table.
    pub fn display_decimals(self) -> usize {
        match self {
            Column::CoberturaMes => 1,
            _ => 0,
        }
    }

    /// The cell coerced to text.
    pub fn text_value(self, record: &Record) -> String {
        match self {
            Column::Codigo => record.codigo.clone(),
            Column::Clave => record.clave.clone(),
            Column::DescProd => record.desc_prod.clone(),
            Column::Clasificacion => record.clasificacion.clone(),
            numeric => numeric.numeric_value(record).to_string(),
        }
    }

    /// The cell coerced to a number. Text columns go through the same
    /// coercion as CSV cells, so non-numeric text reads as 0.
    pub fn numeric_value(self, record: &Record) -> f64 {
        match self {
            Column::Inv => record.inv,
            Column::PromedioVtaMes => record.promedio_vta_mes,
            Column::CoberturaMes => record.cobertura_mes,
            Column::CoberturaDias30 => record.cobertura_dias_30,
            Column::Codigo => parse_number(&record.codigo),
            Column::Clave => parse_number(&record.clave),
            Column::DescProd => parse_number(&record.desc_prod),
            Column::Clasificacion => parse_number(&record.clasificacion),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CoverageBand – the coverage (months) selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageBand {
    #[default]
    All,
    /// `[0, 1]`
    Critico,
    /// `(1, 3]`
    Medio,
    /// `> 3`
    Alto,
}

impl CoverageBand {
    pub const ALL: [CoverageBand; 4] = [
        CoverageBand::All,
        CoverageBand::Critico,
        CoverageBand::Medio,
        CoverageBand::Alto,
    ];

    /// Whether a `cobertura_mes` value falls in this band. Negative coverage
    /// only passes `All`.
    pub fn contains(self, cobertura_mes: f64) -> bool {
        match self {
            CoverageBand::All => true,
            CoverageBand::Critico => (0.0..=1.0).contains(&cobertura_mes),
            CoverageBand::Medio => cobertura_mes > 1.0 && cobertura_mes <= 3.0,
            CoverageBand::Alto => cobertura_mes > 3.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CoverageBand::All => "all",
            CoverageBand::Critico => "critico",
            CoverageBand::Medio => "medio",
            CoverageBand::Alto => "alto",
        }
    }

    /// Human-readable option text for the selector.
    pub fn label(self) -> &'static str {
        match self {
            CoverageBand::All => "All",
            CoverageBand::Critico => "Crítico (0–1 mes)",
            CoverageBand::Medio => "Medio (1–3 meses)",
            CoverageBand::Alto => "Alto (> 3 meses)",
        }
    }
}

impl fmt::Display for CoverageBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoverageBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoverageBand::ALL
            .into_iter()
            .find(|band| band.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown coverage band '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// HeatLevel – coverage-days tint for table cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatLevel {
    Low,
    Mid,
    High,
}

impl HeatLevel {
    /// ≤ 30 days is low, ≤ 90 mid, anything above high.
    pub fn for_days(cobertura_dias_30: f64) -> Self {
        if cobertura_dias_30 <= 30.0 {
            HeatLevel::Low
        } else if cobertura_dias_30 <= 90.0 {
            HeatLevel::Mid
        } else {
            HeatLevel::High
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeatLevel::Low => "low",
            HeatLevel::Mid => "mid",
            HeatLevel::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// Inventory – the complete loaded record set
// ---------------------------------------------------------------------------

/// Where a record set came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOrigin {
    /// Automatic load at startup (path or URL, as configured).
    Startup(String),
    /// File picked by the user.
    Manual(PathBuf),
}

/// The full parsed record set. Replaced wholesale on every successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub records: Vec<Record>,
    pub origin: LoadOrigin,
}

impl Inventory {
    pub fn new(records: Vec<Record>, origin: LoadOrigin) -> Self {
        Inventory { records, origin }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_band_boundaries() {
        assert!(CoverageBand::Critico.contains(0.0));
        assert!(CoverageBand::Critico.contains(1.0));
        assert!(!CoverageBand::Medio.contains(1.0));
        assert!(CoverageBand::Medio.contains(3.0));
        assert!(!CoverageBand::Alto.contains(3.0));
        assert!(CoverageBand::Alto.contains(3.0001));
        assert!(!CoverageBand::Critico.contains(-0.5));
        assert!(CoverageBand::All.contains(-0.5));
    }

    #[test]
    fn coverage_band_parses_names() {
        assert_eq!("MEDIO".parse::<CoverageBand>(), Ok(CoverageBand::Medio));
        assert_eq!(" all ".parse::<CoverageBand>(), Ok(CoverageBand::All));
        assert!("bajo".parse::<CoverageBand>().is_err());
    }

    #[test]
    fn heat_level_bands() {
        assert_eq!(HeatLevel::for_days(30.0), HeatLevel::Low);
        assert_eq!(HeatLevel::for_days(30.5), HeatLevel::Mid);
        assert_eq!(HeatLevel::for_days(60.0), HeatLevel::Mid);
        assert_eq!(HeatLevel::for_days(90.0), HeatLevel::Mid);
        assert_eq!(HeatLevel::for_days(91.0), HeatLevel::High);
        assert_eq!(HeatLevel::for_days(-4.0), HeatLevel::Low);
    }

    #[test]
    fn column_coercions() {
        let rec = Record {
            codigo: "120".into(),
            inv: 2.5,
            ..Record::default()
        };
        assert_eq!(Column::Inv.text_value(&rec), "2.5");
        assert_eq!(Column::Codigo.numeric_value(&rec), 120.0);
        assert_eq!(Column::Clave.numeric_value(&rec), 0.0);
        assert!(Column::CoberturaDias30.is_numeric());
        assert!(!Column::Clasificacion.is_numeric());
    }
}
