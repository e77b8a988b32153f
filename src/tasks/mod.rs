pub mod renewal_alerts;
