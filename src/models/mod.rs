pub mod outage;
pub mod preferences;
pub mod subscription;
