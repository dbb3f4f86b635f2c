pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_empty_entries() {
        assert_eq!(split_csv(" smoke, ,long-haul,"), ["smoke", "long-haul"]);
        assert!(split_csv("").is_empty());
    }
}
