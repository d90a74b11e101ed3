use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::common::{normalize_date, normalize_opt, normalize_text, AggregateRoot};
use crate::shared::metadata::{
    ColumnSpec, Encoding, FieldKind, FieldSpec, ResourceDescriptor, ResourceRoutes,
    ResourceUiMetadata,
};
use crate::shared::report::{ChartKind, GroupOrder, ReportSpec, SummaryLine};
use crate::shared::stats::{count_where, StatItem};

pub const GENDERS: &[&str] = &["MALE", "FEMALE"];
pub const ROLES: &[&str] = &["MANAGER", "ADMINISTRATIVE", "SCIENTIST", "OTHER"];

// ============================================================================
// Metadata
// ============================================================================

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("staffId", "Staff ID", FieldKind::Text),
    FieldSpec::required("firstName", "First Name", FieldKind::Text),
    FieldSpec::required("lastName", "Last Name", FieldKind::Text),
    FieldSpec::required("designation", "Designation", FieldKind::Text),
    FieldSpec::required("gender", "Gender", FieldKind::Choice(GENDERS)),
    FieldSpec::required("joinedDate", "Joined Date", FieldKind::Date),
    FieldSpec::optional("dob", "Date of Birth", FieldKind::Date),
    FieldSpec::optional("address", "Address", FieldKind::LongText),
    FieldSpec::required("contactNo", "Contact No", FieldKind::Phone),
    FieldSpec::required("email", "Email", FieldKind::Email),
    FieldSpec::required("role", "Role", FieldKind::Choice(ROLES)),
    FieldSpec::optional("logCode", "Log Code", FieldKind::Text),
];

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("staffId", "ID"),
    ColumnSpec::plain("firstName", "First Name"),
    ColumnSpec::plain("lastName", "Last Name"),
    ColumnSpec::plain("designation", "Designation"),
    ColumnSpec::plain("role", "Role"),
    ColumnSpec::plain("contactNo", "Contact"),
    ColumnSpec::plain("email", "Email"),
];

pub static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
    entity_index: "a004",
    collection_name: "staff",
    key_field: "staffId",
    ui: ResourceUiMetadata {
        element_name: "Staff Member",
        list_name: "Staff",
        icon: "users",
        empty_message: "No staff members found. Add your first staff member to get started.",
        placeholder: "--",
    },
    routes: ResourceRoutes {
        base_path: "/api/v1/staff",
        list: "/all",
        get: "/{key}",
        create: "",
        update: "/{key}",
        delete: "/{key}",
    },
    encoding: Encoding::Json,
    fields: FIELDS,
    columns: COLUMNS,
    facets: &["role"],
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Farm staff member. Vehicles, equipment and fields reference the staff by
/// `staffId`; they are separate resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Staff {
    pub staff_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub designation: Option<String>,
    pub gender: Option<String>,
    /// `YYYY-MM-DD`
    pub joined_date: Option<String>,
    pub dob: Option<String>,
    pub address: Option<String>,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub log_code: Option<String>,
}

impl Staff {
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn joined_year(&self) -> Option<i32> {
        self.joined_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }
}

impl AggregateRoot for Staff {
    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }

    fn key(&self) -> &str {
        &self.staff_id
    }

    fn field_value(&self, name: &str) -> Option<String> {
        match name {
            "staffId" => Some(self.staff_id.clone()),
            "firstName" => self.first_name.clone(),
            "lastName" => self.last_name.clone(),
            "designation" => self.designation.clone(),
            "gender" => self.gender.clone(),
            "joinedDate" => self.joined_date.clone(),
            "dob" => self.dob.clone(),
            "address" => self.address.clone(),
            "contactNo" => self.contact_no.clone(),
            "email" => self.email.clone(),
            "role" => self.role.clone(),
            "logCode" => self.log_code.clone(),
            _ => None,
        }
    }

    fn normalize(self) -> Self {
        Self {
            staff_id: normalize_text(self.staff_id),
            first_name: normalize_opt(self.first_name),
            last_name: normalize_opt(self.last_name),
            designation: normalize_opt(self.designation),
            gender: normalize_opt(self.gender),
            joined_date: normalize_date(self.joined_date),
            dob: normalize_date(self.dob),
            address: normalize_opt(self.address),
            contact_no: normalize_opt(self.contact_no),
            email: normalize_opt(self.email),
            role: normalize_opt(self.role),
            log_code: normalize_opt(self.log_code),
        }
    }

    fn stats(records: &[Self], _today: NaiveDate) -> Vec<StatItem> {
        vec![
            StatItem::new("Total Staff", records.len(), "users"),
            StatItem::new("Managers", count_where(records, |s| s.has_role("MANAGER")), "briefcase"),
            StatItem::new(
                "Administrative",
                count_where(records, |s| s.has_role("ADMINISTRATIVE")),
                "clipboard",
            ),
            StatItem::new(
                "Scientists",
                count_where(records, |s| s.has_role("SCIENTIST")),
                "flask",
            ),
        ]
    }

    fn reports() -> Vec<ReportSpec<Self>> {
        vec![
            ReportSpec {
                id: "role",
                title: "Role Distribution",
                group_label: "Role",
                chart: ChartKind::Pie,
                order: GroupOrder::FirstSeen,
                key: |s| s.role.clone(),
                image: None,
            },
            ReportSpec {
                id: "gender",
                title: "Gender Distribution",
                group_label: "Gender",
                chart: ChartKind::Pie,
                order: GroupOrder::FirstSeen,
                key: |s| s.gender.clone(),
                image: None,
            },
            ReportSpec {
                id: "joining",
                title: "Joining Trends",
                group_label: "Year",
                chart: ChartKind::Line,
                order: GroupOrder::Ascending,
                key: |s| s.joined_year().map(|y| y.to_string()),
                image: None,
            },
        ]
    }

    fn summary(records: &[Self]) -> Vec<SummaryLine> {
        let trend = joining_trend(records);
        let mut lines = vec![
            SummaryLine::new("Total Staff", records.len()),
            SummaryLine::new("Managers", count_where(records, |s| s.has_role("MANAGER"))),
            SummaryLine::new(
                "Administrative",
                count_where(records, |s| s.has_role("ADMINISTRATIVE")),
            ),
            SummaryLine::new("Scientists", count_where(records, |s| s.has_role("SCIENTIST"))),
            SummaryLine::new(
                "Gender Diversity Score",
                format!("{}/100", diversity_score(records)),
            ),
            SummaryLine::new("Average Annual Growth", format!("{:.1}%", trend.average_growth)),
        ];
        if let Some(peak) = trend.peak {
            lines.push(SummaryLine::new(
                "Peak Hiring Year",
                format!("{} ({} hires)", peak.year, peak.hires),
            ));
        }
        lines
    }

    fn detail_notes(&self) -> Vec<SummaryLine> {
        vec![SummaryLine::new("Full Name", {
            let name = self.full_name();
            if name.is_empty() {
                DESCRIPTOR.ui.placeholder.to_string()
            } else {
                name
            }
        })]
    }

    /// Links are joined server-side by code; the write body carries them empty
    fn decorate_json(payload: &mut Map<String, Value>) {
        for key in ["vehicleDtos", "equipmentDtos", "fields"] {
            payload.insert(key.to_string(), Value::Array(Vec::new()));
        }
    }
}

// ============================================================================
// Joining trend
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearCount {
    pub year: i32,
    pub hires: usize,
    /// Change against the previous listed year, percent
    pub growth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoiningTrend {
    /// Ascending by year
    pub years: Vec<YearCount>,
    pub average_growth: f64,
    /// First year with the most hires
    pub peak: Option<YearCount>,
}

pub fn joining_trend(staff: &[Staff]) -> JoiningTrend {
    let mut counts: Vec<(i32, usize)> = Vec::new();
    for year in staff.iter().filter_map(Staff::joined_year) {
        match counts.iter_mut().find(|(y, _)| *y == year) {
            Some((_, n)) => *n += 1,
            None => counts.push((year, 1)),
        }
    }
    counts.sort_by_key(|(year, _)| *year);

    let mut years = Vec::with_capacity(counts.len());
    let mut previous: Option<usize> = None;
    for (year, hires) in counts {
        let growth = previous.map(|prev| {
            if prev > 0 {
                (hires as f64 - prev as f64) / prev as f64 * 100.0
            } else {
                0.0
            }
        });
        years.push(YearCount { year, hires, growth });
        previous = Some(hires);
    }

    let rates: Vec<f64> = years.iter().filter_map(|y| y.growth).collect();
    let average_growth = if rates.is_empty() {
        0.0
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    };

    let mut peak: Option<YearCount> = None;
    for y in &years {
        if peak.map_or(true, |p| y.hires > p.hires) {
            peak = Some(*y);
        }
    }

    JoiningTrend {
        years,
        average_growth,
        peak,
    }
}

/// 100 for an even MALE/FEMALE split, falling linearly towards 0
pub fn diversity_score(staff: &[Staff]) -> u32 {
    if staff.is_empty() {
        return 0;
    }
    let total = staff.len() as f64;
    let share = |gender: &str| {
        count_where(staff, |s| s.gender.as_deref() == Some(gender)) as f64 / total * 100.0
    };
    let male = 50.0 - (share("MALE") - 50.0).abs();
    let female = 50.0 - (share("FEMALE") - 50.0).abs();
    (male + female).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn staff(id: &str, role: &str, gender: &str, joined: &str) -> Staff {
        Staff {
            staff_id: id.into(),
            first_name: Some("First".into()),
            last_name: Some(id.into()),
            role: Some(role.into()),
            gender: Some(gender.into()),
            joined_date: Some(joined.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_ignores_link_lists() {
        let s: Staff = serde_json::from_value(json!({
            "staffId": "S-1",
            "firstName": "Amal",
            "joinedDate": "2021-04-10T00:00:00",
            "vehicleDtos": [{"vehicleCode": "V-1"}],
            "fields": []
        }))
        .unwrap();
        let s = s.normalize();
        assert_eq!(s.joined_date.as_deref(), Some("2021-04-10"));
        assert_eq!(s.joined_year(), Some(2021));
        assert_eq!(s.display_value("address"), "--");
    }

    #[test]
    fn test_role_stats() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let list = vec![
            staff("S1", "MANAGER", "MALE", "2020-01-01"),
            staff("S2", "SCIENTIST", "FEMALE", "2021-01-01"),
            staff("S3", "SCIENTIST", "FEMALE", "2021-06-01"),
        ];
        let values: Vec<String> = Staff::stats(&list, today).into_iter().map(|s| s.value).collect();
        assert_eq!(values, vec!["3", "1", "0", "2"]);
    }

    #[test]
    fn test_joining_trend() {
        let list = vec![
            staff("S1", "OTHER", "MALE", "2021-01-01"),
            staff("S2", "OTHER", "MALE", "2020-01-01"),
            staff("S3", "OTHER", "MALE", "2020-05-01"),
            staff("S4", "OTHER", "MALE", "2022-05-01"),
            staff("S5", "OTHER", "MALE", "2022-06-01"),
        ];
        let trend = joining_trend(&list);
        let years: Vec<(i32, usize)> = trend.years.iter().map(|y| (y.year, y.hires)).collect();
        assert_eq!(years, vec![(2020, 2), (2021, 1), (2022, 2)]);
        assert_eq!(trend.years[0].growth, None);
        assert_eq!(trend.years[1].growth, Some(-50.0));
        assert_eq!(trend.years[2].growth, Some(100.0));
        assert_eq!(trend.average_growth, 25.0);
        assert_eq!(trend.peak.map(|p| p.year), Some(2020));
    }

    #[test]
    fn test_joining_report_sorted_by_year() {
        let list = vec![
            staff("S1", "OTHER", "MALE", "2023-01-01"),
            staff("S2", "OTHER", "MALE", "2019-01-01"),
        ];
        let spec = Staff::reports().into_iter().find(|r| r.id == "joining").unwrap();
        let report = spec.build(&list);
        assert_eq!(report.groups()[0].label, "2019");
    }

    #[test]
    fn test_diversity_score() {
        assert_eq!(diversity_score(&[]), 0);
        let even = vec![
            staff("S1", "OTHER", "MALE", ""),
            staff("S2", "OTHER", "FEMALE", ""),
        ];
        assert_eq!(diversity_score(&even), 100);
        let skewed = vec![
            staff("S1", "OTHER", "MALE", ""),
            staff("S2", "OTHER", "MALE", ""),
            staff("S3", "OTHER", "MALE", ""),
            staff("S4", "OTHER", "FEMALE", ""),
        ];
        assert_eq!(diversity_score(&skewed), 50);
    }
}
