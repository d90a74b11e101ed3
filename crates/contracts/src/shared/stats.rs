//! Statistics strip shown above each table, derived from the loaded records

/// One card of the statistics strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatItem {
    pub label: &'static str,
    pub value: String,
    pub icon: &'static str,
}

impl StatItem {
    pub fn new(label: &'static str, value: impl ToString, icon: &'static str) -> Self {
        Self {
            label,
            value: value.to_string(),
            icon,
        }
    }
}

pub fn count_where<T>(items: &[T], pred: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| pred(item)).count()
}

/// Number of distinct non-blank values
pub fn distinct_count<'a>(values: impl IntoIterator<Item = &'a str>) -> usize {
    let mut seen: Vec<&str> = Vec::new();
    for value in values.into_iter().map(str::trim).filter(|v| !v.is_empty()) {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen.len()
}

/// Most frequent non-blank value; ties go to the value seen first
pub fn most_common<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values.into_iter().map(str::trim).filter(|v| !v.is_empty()) {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (value, n) in counts {
        if best.map_or(true, |(_, b)| n > b) {
            best = Some((value, n));
        }
    }
    best.map(|(value, _)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_count_ignores_blank() {
        assert_eq!(distinct_count(["F-1", "F-2", "F-1", "", "  "]), 2);
        assert_eq!(distinct_count(Vec::<&str>::new()), 0);
    }

    #[test]
    fn test_most_common_first_max_wins() {
        assert_eq!(
            most_common(["Fall", "Spring", "Spring", "Fall"]),
            Some("Fall".to_string())
        );
        assert_eq!(
            most_common(["Spring", "Fall", "Fall"]),
            Some("Fall".to_string())
        );
        assert_eq!(most_common(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_count_where() {
        let statuses = ["Active", "Maintenance", "Active"];
        assert_eq!(count_where(&statuses, |s| *s == "Active"), 2);
    }
}
