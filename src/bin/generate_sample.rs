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
}

fn pick<'a>(rng: &mut SimpleRng, options: &[&'a str]) -> &'a str {
    options[(rng.next_f64() * options.len() as f64) as usize % options.len()]
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let countries = [
        "Nigeria", "Kenya", "Egypt", "South Africa", "Ghana", "Senegal", "Morocco", "Rwanda",
    ];
    let industries = [
        "Fintech", "Healthtech", "Agritech", "Logistics", "Edtech", "Energy", "E-commerce",
    ];
    // Roughly ordered by prominence; the skewed index draw below makes the
    // front of the list close more deals, so the top-N view has shape.
    let investors = [
        "Savannah Capital",
        "Baobab Ventures",
        "Lagos Growth Partners",
        "Nile Delta Fund",
        "Atlas Seed Group",
        "Harambee Angels",
        "Sahel Equity",
        "Cape Horizon Capital",
        "Kigali Innovation Fund",
        "Accra Frontier Partners",
        "Dakar Impact Ventures",
        "Maghreb Tech Fund",
    ];

    let n_deals = 250;
    let output_path = "sample_funding_data.csv";

    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["year", "country", "industry", "investor", "amount_usd_millions"])
        .expect("Failed to write header");

    for i in 0..n_deals {
        let year = 2018 + (rng.next_f64() * 8.0) as i32;
        let country = pick(&mut rng, &countries);
        let industry = pick(&mut rng, &industries);

        // Product of two uniforms skews toward the front of the roster.
        let idx = ((rng.next_f64() * rng.next_f64()) * investors.len() as f64) as usize;
        let investor = investors[idx.min(investors.len() - 1)];

        // Log-normal deal sizes: lots of small rounds, a few large ones.
        let amount = rng.gauss(0.0, 1.0).exp() * 8.0;

        // Sprinkle in the kind of dirty cell real exports contain; the
        // loader coerces these to 0.
        let amount_field = if i % 50 == 37 {
            "N/A".to_string()
        } else {
            format!("{amount:.1}")
        };

        writer
            .write_record([
                year.to_string(),
                country.to_string(),
                industry.to_string(),
                investor.to_string(),
                amount_field,
            ])
            .expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_deals} deals to {output_path}");
}
