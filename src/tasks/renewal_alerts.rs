use chrono::NaiveDate;

use crate::models::activity::{ActivityAction, LogActivityRequest};
use crate::services::activity::ActivityLogStore;
use crate::services::renewals::RenewalStore;

/// Run-once sweep at startup: logs every renewal whose alert window covers
/// `today` and records it in the activity journal. There is no scheduler;
/// clients poll `/renewals/alerts` for live reminders.
pub fn run_renewal_alert_sweep(
    renewals: &RenewalStore,
    activity: &ActivityLogStore,
    today: NaiveDate,
) -> usize {
    let due = renewals.alerts_due(today);
    if due.is_empty() {
        log::info!("renewal sweep: nothing due");
        return 0;
    }

    for renewal in &due {
        log::info!(
            "renewal reminder: {} renews on {} ({}/{:?})",
            renewal.subscription_name,
            renewal.next_renewal_date,
            renewal.price,
            renewal.billing_cycle
        );
        let logged = activity.log(LogActivityRequest {
            action: ActivityAction::Renewal,
            details: format!(
                "{} renews on {}",
                renewal.subscription_name, renewal.next_renewal_date
            ),
            subscription_id: Some(renewal.subscription_id.clone()),
            subscription_name: Some(renewal.subscription_name.clone()),
            previous_value: None,
            new_value: None,
        });
        if let Err(e) = logged {
            log::error!(
                "failed to record renewal reminder for {}: {}",
                renewal.subscription_id,
                e
            );
        }
    }
    due.len()
}
