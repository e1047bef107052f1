//! Seeding through the public API

mod common;

use common::{TestEnv, HOLIDAYS_CSV, RATES_CSV};
use timesheet::models::TableName;
use timesheet::seed::{SeedCoordinator, SeedTarget};
use timesheet::storage::EntityStore;

#[test]
fn test_seed_empty_rates_then_skip() {
    let env = TestEnv::new();
    env.write_seed_file("rates.csv", RATES_CSV);
    let seeder = SeedCoordinator::new(env.registry());

    assert_eq!(seeder.seed_if_empty(TableName::Rates).unwrap(), 5);
    assert_eq!(env.storage.rates.count().unwrap(), 5);

    assert_eq!(seeder.seed_if_empty(TableName::Rates).unwrap(), 0);
    assert_eq!(env.storage.rates.count().unwrap(), 5);
}

#[test]
fn test_seeded_rows_get_sequential_ids() {
    let env = TestEnv::new();
    env.write_seed_file("rates.csv", RATES_CSV);
    SeedCoordinator::new(env.registry())
        .seed_if_empty(TableName::Rates)
        .unwrap();

    let ids: Vec<u64> = env.storage.rates.get_all().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_seeded_rows_survive_reload() {
    let env = TestEnv::new();
    env.write_seed_file("holidays.csv", HOLIDAYS_CSV);
    SeedCoordinator::new(env.registry())
        .seed_if_empty(TableName::Holidays)
        .unwrap();

    env.storage.holidays.load().unwrap();
    let holidays = env.storage.holidays.get_all().unwrap();
    assert_eq!(holidays.len(), 2);
    assert_eq!(holidays[1].description, "Christmas Day");
}

#[test]
fn test_seed_all_reports_missing_files() {
    let env = TestEnv::new();
    env.write_seed_file("rates.csv", RATES_CSV);
    env.write_seed_file("holidays.csv", HOLIDAYS_CSV);

    let report = SeedCoordinator::new(env.registry())
        .seed(SeedTarget::All, false)
        .unwrap();

    assert_eq!(report.total_records(), 7);
    let failed: Vec<TableName> = report.failures().map(|t| t.table).collect();
    assert_eq!(
        failed,
        vec![
            TableName::Consultants,
            TableName::Projects,
            TableName::ReportedRecords
        ]
    );
}

#[test]
fn test_forced_seed_appends() {
    let env = TestEnv::new();
    env.write_seed_file("rates.csv", RATES_CSV);
    let seeder = SeedCoordinator::new(env.registry());

    seeder.seed_if_empty(TableName::Rates).unwrap();
    let report = seeder
        .seed(SeedTarget::Table(TableName::Rates), true)
        .unwrap();

    assert_eq!(report.total_records(), 5);
    assert_eq!(env.storage.rates.count().unwrap(), 10);
}
