use anyhow::{Result, bail};

/// Seed used when no usable tokens are given.
pub const DEFAULT_SEED: u64 = 1848;

/// Resolve CLI seed arguments into a deduplicated list.
///
/// Accepts literal integers (negative values use their magnitude) and
/// `a..b` ranges, inclusive of both ends.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::new();
    let mut push = |seed: u64| {
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    };

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if let Some((start, end)) = token.split_once("..") {
            let (Ok(start), Ok(end)) = (start.parse::<u64>(), end.parse::<u64>()) else {
                bail!("Unrecognized seed range: {token}");
            };
            if start > end {
                bail!("Seed range runs backwards: {token}");
            }
            (start..=end).for_each(&mut push);
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            push(value.unsigned_abs());
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            push(value);
            continue;
        }

        bail!("Unrecognized seed token: {token}");
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }
    Ok(seeds)
}
