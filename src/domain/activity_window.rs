use chrono::{DateTime, Utc};

use crate::domain::{AccountId, Activity, Error, Money};

/// The activities currently loaded for an account.
///
/// Append-only: activities are added through [`ActivityWindow::add_activity`]
/// and can only be read back through a shared slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityWindow {
    activities: Vec<Activity>,
}

impl ActivityWindow {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Activities not yet stored by a repository.
    pub fn unsaved_activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter().filter(|a| a.id().is_none())
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn start_timestamp(&self) -> Result<DateTime<Utc>, Error> {
        self.activities
            .iter()
            .map(Activity::timestamp)
            .min()
            .ok_or(Error::EmptyWindow)
    }

    pub fn end_timestamp(&self) -> Result<DateTime<Utc>, Error> {
        self.activities
            .iter()
            .map(Activity::timestamp)
            .max()
            .ok_or(Error::EmptyWindow)
    }

    /// Deposits into `account_id` minus withdrawals from it, whoever owns the entry.
    pub fn calculate_balance(&self, account_id: AccountId) -> Result<Money, Error> {
        let deposits = self
            .activities
            .iter()
            .filter(|a| a.target_account_id() == account_id)
            .try_fold(Money::ZERO, |sum, a| sum.add(a.money()))?;

        let withdrawals = self
            .activities
            .iter()
            .filter(|a| a.source_account_id() == account_id)
            .try_fold(Money::ZERO, |sum, a| sum.add(a.money()))?;

        deposits.subtract(withdrawals)
    }
}

#[cfg(test)]
mod tests {
    use super::ActivityWindow;
    use crate::domain::{AccountId, Activity, ActivityId, Error, Money};
    use chrono::{DateTime, TimeZone, Utc};

    const OWNER: AccountId = AccountId(1);
    const OTHER: AccountId = AccountId(2);

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn activity(source: AccountId, target: AccountId, hour: u32, amount: i64) -> Activity {
        Activity::new(OWNER, source, target, at(hour), Money::of(amount))
    }

    #[test]
    fn start_and_end_timestamps_ignore_insertion_order() {
        let window = ActivityWindow::new(vec![
            activity(OWNER, OTHER, 12, 1),
            activity(OWNER, OTHER, 9, 1),
            activity(OTHER, OWNER, 17, 1),
        ]);

        assert_eq!(window.start_timestamp().unwrap(), at(9));
        assert_eq!(window.end_timestamp().unwrap(), at(17));
    }

    #[test]
    fn empty_window_has_no_bounds() {
        let window = ActivityWindow::empty();
        assert!(matches!(window.start_timestamp(), Err(Error::EmptyWindow)));
        assert!(matches!(window.end_timestamp(), Err(Error::EmptyWindow)));
    }

    #[test]
    fn balance_is_deposits_minus_withdrawals() {
        let window = ActivityWindow::new(vec![
            activity(OTHER, OWNER, 9, 999),
            activity(OWNER, OTHER, 10, 1),
            activity(OWNER, OTHER, 11, 500),
            activity(OTHER, OWNER, 12, 1),
        ]);

        assert_eq!(window.calculate_balance(OWNER).unwrap(), Money::of(499));
        assert_eq!(window.calculate_balance(OTHER).unwrap(), Money::of(-499));
        assert_eq!(
            window.calculate_balance(AccountId(3)).unwrap(),
            Money::ZERO
        );
    }

    #[test]
    fn add_activity_appends() {
        let mut window = ActivityWindow::empty();
        window.add_activity(activity(OTHER, OWNER, 9, 10));
        window.add_activity(activity(OWNER, OTHER, 10, 4));

        assert_eq!(window.len(), 2);
        assert_eq!(window.activities()[1].money(), Money::of(4));
        assert_eq!(window.calculate_balance(OWNER).unwrap(), Money::of(6));
    }

    #[test]
    fn unsaved_activities_skip_stored_ones() {
        let window = ActivityWindow::new(vec![
            activity(OTHER, OWNER, 9, 10).with_id(ActivityId(7)),
            activity(OWNER, OTHER, 10, 4),
        ]);

        let unsaved: Vec<_> = window.unsaved_activities().collect();
        assert_eq!(unsaved.len(), 1);
        assert_eq!(unsaved[0].timestamp(), at(10));
    }
}
