use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::print_batches;
use parquet::arrow::ArrowWriter;

use rusty_realty::config::default_source;
use rusty_realty::data::model::PropertyType;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Market shape of one sheet.
struct Profile {
    rows: usize,
    /// (rooms, mean area m², area std)
    layouts: &'static [(i64, f64, f64)],
    mean_price_per_m2: f64,
    neighbourhoods: &'static [&'static str],
    /// Column headers: price, area, rooms, neighbourhood.
    headers: [&'static str; 4],
}

fn profile(property_type: PropertyType) -> Profile {
    match property_type {
        PropertyType::Apartment => Profile {
            rows: 400,
            layouts: &[(1, 45.0, 8.0), (2, 70.0, 12.0), (3, 105.0, 18.0)],
            mean_price_per_m2: 1_650.0,
            neighbourhoods: &["Villa Morra", "Carmelitas", "Recoleta", "Las Mercedes"],
            headers: ["Precio_USD", "Superficie_m2", "habitaciones", "barrio"],
        },
        // Lower-case and capitalised headers exercise the key-casing fallback.
        PropertyType::House => Profile {
            rows: 250,
            layouts: &[(2, 110.0, 20.0), (3, 160.0, 30.0), (4, 230.0, 45.0), (5, 320.0, 60.0)],
            mean_price_per_m2: 1_100.0,
            neighbourhoods: &["Lambaré", "San Lorenzo", "Luque", "Mburucuyá"],
            headers: ["precio_usd", "superficie_m2", "Habitaciones", "barrio"],
        },
    }
}

fn build_batch(property_type: PropertyType, rng: &mut SimpleRng) -> Result<RecordBatch> {
    let p = profile(property_type);

    let mut prices: Vec<Option<f64>> = Vec::with_capacity(p.rows);
    let mut areas: Vec<Option<f64>> = Vec::with_capacity(p.rows);
    let mut rooms: Vec<Option<i64>> = Vec::with_capacity(p.rows);
    let mut barrios: Vec<Option<&str>> = Vec::with_capacity(p.rows);

    for i in 0..p.rows {
        let (n_rooms, mean_area, std_area) = p.layouts[i % p.layouts.len()];
        let mut area = rng.gauss(mean_area, std_area).max(18.0);
        // A handful of mistyped areas so the outlier toggle has something to do.
        if rng.chance(0.02) {
            area *= 10.0;
        }
        let price_per_m2 = rng.gauss(p.mean_price_per_m2, p.mean_price_per_m2 * 0.18).max(300.0);
        let price = (area * price_per_m2 / 500.0).round() * 500.0;

        prices.push((!rng.chance(0.03)).then_some(price));
        areas.push((!rng.chance(0.03)).then_some((area * 10.0).round() / 10.0));
        rooms.push((!rng.chance(0.01)).then_some(n_rooms));
        barrios.push(Some(p.neighbourhoods[i % p.neighbourhoods.len()]));
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new(p.headers[0], DataType::Float64, true),
        Field::new(p.headers[1], DataType::Float64, true),
        Field::new(p.headers[2], DataType::Int64, true),
        Field::new(p.headers[3], DataType::Utf8, true),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Float64Array::from(prices)),
            Arc::new(Float64Array::from(areas)),
            Arc::new(Int64Array::from(rooms)),
            Arc::new(StringArray::from(barrios)),
        ],
    )
    .context("building record batch")
}

fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).context("creating writer")?;
    writer.write(batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn write_csv(batch: &RecordBatch, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let schema = batch.schema();
    writer.write_record(schema.fields().iter().map(|f| f.name().as_str()))?;

    let price = batch.column(0).as_any().downcast_ref::<Float64Array>().context("price column")?;
    let area = batch.column(1).as_any().downcast_ref::<Float64Array>().context("area column")?;
    let rooms = batch.column(2).as_any().downcast_ref::<Int64Array>().context("rooms column")?;
    let barrio = batch.column(3).as_any().downcast_ref::<StringArray>().context("barrio column")?;

    for row in 0..batch.num_rows() {
        let cell = |present: bool, text: String| if present { text } else { String::new() };
        writer.write_record([
            cell(price.is_valid(row), price.value(row).to_string()),
            cell(area.is_valid(row), area.value(row).to_string()),
            cell(rooms.is_valid(row), rooms.value(row).to_string()),
            cell(barrio.is_valid(row), barrio.value(row).to_string()),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    for property_type in PropertyType::ALL {
        let batch = build_batch(property_type, &mut rng)?;

        let parquet_path = default_source(property_type);
        if let Some(dir) = parquet_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        write_parquet(&batch, &parquet_path)?;

        let csv_path = parquet_path.with_extension("csv");
        write_csv(&batch, &csv_path)?;

        println!(
            "Wrote {} {} listings to {} and {}",
            batch.num_rows(),
            property_type.label().to_lowercase(),
            parquet_path.display(),
            csv_path.display()
        );
        print_batches(&[batch.slice(0, batch.num_rows().min(5))])?;
    }

    Ok(())
}
