//! Deterministic random color records

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use swatch_core::{ColorModel, ColorRecord, ColorType};

const NAME_PARTS: &[&str] = &[
    "Chantilly", "Lace", "Hale", "Navy", "Caf\u{e9}", "au", "Lait", "Z\u{fc}rich", "\u{6DF1}\u{7D05}",
    "\u{1F3A8}", "Palladian", "Blue", "Gray", "Owl",
];

/// Channel values within the usual range for `model`
pub fn random_values(rng: &mut impl Rng, model: ColorModel) -> Vec<f32> {
    match model {
        ColorModel::Lab => vec![
            rng.gen_range(0.0..=100.0),
            rng.gen_range(-128.0..=127.0),
            rng.gen_range(-128.0..=127.0),
        ],
        _ => (0..model.arity()).map(|_| rng.gen_range(0.0..=1.0)).collect(),
    }
}

pub fn random_name(rng: &mut impl Rng) -> String {
    let words = rng.gen_range(1..=3);
    (0..words)
        .map(|_| NAME_PARTS[rng.gen_range(0..NAME_PARTS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

/// `count` records spread over `groups` collections, reproducible from `seed`
pub fn random_records(seed: u64, count: usize, groups: usize) -> Vec<ColorRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let group_names: Vec<String> = (0..groups.max(1))
        .map(|i| format!("{} {}", random_name(&mut rng), i))
        .collect();

    let per_group = count.div_ceil(group_names.len()).max(1);
    (0..count)
        .map(|i| {
            let model = ColorModel::ALL[rng.gen_range(0..ColorModel::ALL.len())];
            let color_type = [ColorType::Global, ColorType::Spot, ColorType::Process][rng.gen_range(0..3)];
            let values = random_values(&mut rng, model);
            ColorRecord::new(
                group_names[i / per_group].clone(),
                format!("{} {}", random_name(&mut rng), i),
                model,
                values,
                color_type,
            )
            .expect("random_values matches arity")
        })
        .collect()
}
