pub mod aggregate;

pub use aggregate::{
    diversity_score, joining_trend, JoiningTrend, Staff, YearCount, DESCRIPTOR, GENDERS, ROLES,
};
