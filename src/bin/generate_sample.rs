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

/// Pseudo-first-order FRET decay toward a plateau, rate scaled by enzyme.
fn fret_decay(time: f64, enzyme: f64) -> f64 {
    let plateau = 0.08;
    let amplitude = 0.84;
    let rate = 1.8e6 * enzyme + 1e-5;
    plateau + amplitude * (-rate * time).exp()
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Sampling times (s): dense early, sparse late
    let times: Vec<f64> = (0..10)
        .map(|i| i as f64 * 30.0)
        .chain((1..=11).map(|i| 300.0 + i as f64 * 300.0))
        .collect();

    // Conditions: zero-enzyme control plus an enzyme titration (M)
    let enzymes = [0.0, 0.5e-9, 1e-9, 2e-9, 4e-9];
    let rna = 1e-6;

    let output_path = "sample_fret.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["Time", "FRET", "Error", "Enzyme", "RNA"])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for &enzyme in &enzymes {
        for &time in &times {
            let noise = 0.008;
            let fret = rng.gauss(fret_decay(time, enzyme), noise);
            writer
                .write_record([
                    format!("{time}"),
                    format!("{fret:.5}"),
                    format!("{noise}"),
                    format!("{enzyme:e}"),
                    format!("{rna:e}"),
                ])
                .expect("Failed to write row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush writer");
    println!(
        "Wrote {rows} measurements ({} conditions × {} time points) to {output_path}",
        enzymes.len(),
        times.len()
    );
}
