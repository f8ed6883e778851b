//! Writes a synthetic `inventario.csv` for trying the dashboard.
//!
//! Usage: `generate_sample [output.csv] [--semicolon]`

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let i = (self.next_f64() * items.len() as f64) as usize;
        &items[i.min(items.len() - 1)]
    }
}

const NOUNS: &[&str] = &[
    "Tornillo", "Tuerca", "Arandela", "Broca", "Llave", "Cable", "Cinta", "Brocha", "Pintura",
    "Taladro", "Manguera", "Bisagra",
];
const TRAITS: &[&str] = &[
    "hexagonal", "galvanizado", "inoxidable", "3/8\"", "1/2\"", "industrial", "rojo", "blanco",
    "reforzado",
];

fn main() -> Result<()> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let semicolon = args.iter().any(|a| a == "--semicolon");
    args.retain(|a| a != "--semicolon");
    let output_path = args.first().cloned().unwrap_or_else(|| "inventario.csv".to_string());
    let delimiter = if semicolon { b';' } else { b',' };

    let mut rng = SimpleRng::new(42);
    // The dashboard splits cells on every delimiter, so nothing is quoted.
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Never)
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "Codigo",
        "Clave",
        "Desc_Prod",
        "Inv",
        "Clasificacion",
        "Promedio Vta Mes",
        "Cobertura (Mes)",
        "Cobertura Dias (30)",
    ])?;

    let rows = 250;
    for i in 0..rows {
        // Roughly 20% A, 30% B, 45% C, 5% unclassified.
        let r = rng.next_f64();
        let (clasificacion, base_sales) = match r {
            r if r < 0.20 => ("A", 400.0),
            r if r < 0.50 => ("B", 120.0),
            r if r < 0.95 => ("C", 25.0),
            _ => ("", 5.0),
        };
        let sales = (base_sales * (0.3 + 1.4 * rng.next_f64())).round();
        let months = rng.next_f64() * 6.0;
        let inv = (sales * months).round();
        let cobertura_mes = if sales > 0.0 { inv / sales } else { 0.0 };

        let desc = format!("{} {}", rng.pick(NOUNS), rng.pick(TRAITS));
        writer.write_record([
            format!("{:05}", 10000 + i),
            format!("K-{:04}", i * 7 % 10000),
            desc,
            format!("{inv}"),
            clasificacion.to_string(),
            format!("{sales}"),
            format!("{cobertura_mes:.2}"),
            format!("{:.0}", cobertura_mes * 30.0),
        ])?;
    }
    writer.flush().context("flushing output")?;

    log::info!("Wrote {rows} products to {output_path}");
    println!("Wrote {rows} products to {output_path}");
    Ok(())
}
