pub mod common;

pub mod a001_crop;
pub mod a002_equipment;
pub mod a003_field;
pub mod a004_staff;
pub mod a005_vehicle;
pub mod a006_monitoring_log;
