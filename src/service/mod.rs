pub mod outage_service;
pub mod subscription_service;
