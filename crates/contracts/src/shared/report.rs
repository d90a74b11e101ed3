//! Aggregate report builder: groups the loaded records by one value and
//! counts them, optionally with one representative image per group.

/// How the chart of a report is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Column,
    Pie,
    Line,
}

/// Display order of the groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrder {
    /// Order of first occurrence
    FirstSeen,
    /// Labels ascending, e.g. years
    Ascending,
    /// Fixed label order; labels not listed go last in first-seen order
    Listed(&'static [&'static str]),
    /// Count descending (stable on ties), truncated to `limit`
    Top { limit: usize },
}

/// Count of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
    /// Rounded share of all counted records
    pub percent: u32,
    /// First non-empty image seen in the group (base64)
    pub image: Option<String>,
}

/// Result of grouping; an empty input never produces percentages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateReport {
    NoData,
    Groups {
        /// Records that had a grouping value
        total: usize,
        groups: Vec<GroupCount>,
    },
}

impl AggregateReport {
    pub fn groups(&self) -> &[GroupCount] {
        match self {
            Self::NoData => &[],
            Self::Groups { groups, .. } => groups,
        }
    }

    pub fn total(&self) -> usize {
        match self {
            Self::NoData => 0,
            Self::Groups { total, .. } => *total,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoData)
    }

    pub fn count_of(&self, label: &str) -> Option<usize> {
        self.groups()
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.count)
    }
}

/// One label/value row of a report summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

impl SummaryLine {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// A named grouping over records of type `R`
pub struct ReportSpec<R> {
    pub id: &'static str,
    pub title: &'static str,
    /// Header of the group column
    pub group_label: &'static str,
    pub chart: ChartKind,
    pub order: GroupOrder,
    pub key: fn(&R) -> Option<String>,
    pub image: Option<fn(&R) -> Option<String>>,
}

impl<R> Clone for ReportSpec<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ReportSpec<R> {}

impl<R> std::fmt::Debug for ReportSpec<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportSpec")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("chart", &self.chart)
            .field("order", &self.order)
            .finish()
    }
}

impl<R> ReportSpec<R> {
    pub fn build(&self, records: &[R]) -> AggregateReport {
        let image = self.image;
        let report = group_by(records, self.key, |r| image.and_then(|f| f(r)));
        order_groups(report, self.order)
    }
}

/// Single pass over `items`; blank or absent keys are skipped, groups keep
/// the order of first occurrence.
pub fn group_by<T>(
    items: &[T],
    key: impl Fn(&T) -> Option<String>,
    image: impl Fn(&T) -> Option<String>,
) -> AggregateReport {
    let mut groups: Vec<GroupCount> = Vec::new();
    let mut total = 0usize;

    for item in items {
        let Some(label) = key(item)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
        else {
            continue;
        };
        total += 1;
        let idx = match groups.iter().position(|g| g.label == label) {
            Some(idx) => idx,
            None => {
                groups.push(GroupCount {
                    label,
                    count: 0,
                    percent: 0,
                    image: None,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.count += 1;
        if group.image.is_none() {
            group.image = image(item).filter(|i| !i.trim().is_empty());
        }
    }

    if total == 0 {
        return AggregateReport::NoData;
    }

    for group in &mut groups {
        group.percent = percent_of(group.count, total);
    }
    AggregateReport::Groups { total, groups }
}

/// round(count / total * 100), zero for an empty total
pub fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

pub fn order_groups(report: AggregateReport, order: GroupOrder) -> AggregateReport {
    match report {
        AggregateReport::NoData => AggregateReport::NoData,
        AggregateReport::Groups { total, mut groups } => {
            match order {
                GroupOrder::FirstSeen => {}
                GroupOrder::Ascending => groups.sort_by(|a, b| a.label.cmp(&b.label)),
                GroupOrder::Listed(order) => groups.sort_by_key(|g| {
                    order
                        .iter()
                        .position(|label| *label == g.label)
                        .unwrap_or(order.len())
                }),
                GroupOrder::Top { limit } => {
                    groups.sort_by(|a, b| b.count.cmp(&a.count));
                    groups.truncate(limit);
                }
            }
            AggregateReport::Groups { total, groups }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seasons(values: &[&str]) -> AggregateReport {
        group_by(
            values,
            |s| Some(s.to_string()),
            |_| None,
        )
    }

    #[test]
    fn test_season_counts_and_percentages() {
        let report = seasons(&["Spring", "Spring", "Fall"]);
        assert_eq!(report.total(), 3);
        let groups = report.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].label.as_str(), groups[0].count, groups[0].percent), ("Spring", 2, 67));
        assert_eq!((groups[1].label.as_str(), groups[1].count, groups[1].percent), ("Fall", 1, 33));
    }

    #[test]
    fn test_empty_input_is_no_data() {
        assert_eq!(seasons(&[]), AggregateReport::NoData);
        assert_eq!(seasons(&["", "  "]), AggregateReport::NoData);
        assert_eq!(percent_of(1, 0), 0);
    }

    #[test]
    fn test_blank_keys_are_not_counted() {
        let report = seasons(&["Winter", "", "Winter"]);
        assert_eq!(report.total(), 2);
        assert_eq!(report.groups()[0].percent, 100);
    }

    #[test]
    fn test_first_image_per_group() {
        let rows = [("A", ""), ("A", "img1"), ("A", "img2"), ("B", "")];
        let report = group_by(
            &rows,
            |r| Some(r.0.to_string()),
            |r| Some(r.1.to_string()),
        );
        assert_eq!(report.groups()[0].image.as_deref(), Some("img1"));
        assert_eq!(report.groups()[1].image, None);
    }

    #[test]
    fn test_top_sorts_descending_stable_and_truncates() {
        let report = seasons(&["a", "b", "b", "c", "c", "d"]);
        let top = order_groups(report, GroupOrder::Top { limit: 2 });
        let labels: Vec<&str> = top.groups().iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "c"]);
        assert_eq!(top.total(), 6);
    }

    #[test]
    fn test_listed_order() {
        const ORDER: &[&str] = &["Small", "Medium", "Large"];
        let report = order_groups(
            seasons(&["Large", "Other", "Small", "Large"]),
            GroupOrder::Listed(ORDER),
        );
        let labels: Vec<&str> = report.groups().iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Small", "Large", "Other"]);
    }

    #[test]
    fn test_ascending_order() {
        let report = order_groups(seasons(&["2022", "2020", "2021", "2020"]), GroupOrder::Ascending);
        let labels: Vec<&str> = report.groups().iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["2020", "2021", "2022"]);
        assert_eq!(report.count_of("2020"), Some(2));
    }
}
