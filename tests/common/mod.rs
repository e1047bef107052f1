#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use timesheet::config::{Settings, TimesheetPaths};
use timesheet::models::{Consultant, Project, Rate};
use timesheet::storage::{Storage, StoreRegistry};

pub const RATES_CSV: &str = "name,rate_type,disabled\n\
    Regular,isWorking,false\n\
    Overtime,isWorking,false\n\
    Vacation,isNonWorking,false\n\
    Sick,isNonWorking,false\n\
    Training,isWorking,true\n";

pub const HOLIDAYS_CSV: &str = "date,description\n\
    2024-01-01,New Year's Day\n\
    2024-12-25,Christmas Day\n";

/// A service rooted in a temporary base directory
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub paths: TimesheetPaths,
    pub settings: Settings,
    pub storage: Storage,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let paths = TimesheetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(settings.store_dir(&paths)).unwrap();
        Self {
            temp_dir,
            paths,
            settings,
            storage,
        }
    }

    pub fn base(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn registry(&self) -> StoreRegistry {
        StoreRegistry::from_storage(&self.storage, &self.settings, &self.paths)
    }

    /// Put a few rows in rates, consultants and projects
    pub fn populate(&self) {
        self.storage.rates.insert(Rate::new("Regular", "isWorking")).unwrap();
        self.storage.rates.insert(Rate::new("Vacation", "isNonWorking")).unwrap();
        self.storage.consultants.insert(Consultant::new("Ada")).unwrap();
        self.storage.projects.insert(Project::new("Apollo", "Regular")).unwrap();
    }

    pub fn write_seed_file(&self, file_name: &str, contents: &str) {
        let folder = self.base().join("seed");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join(file_name), contents).unwrap();
    }
}

/// File names in `folder`, sorted
pub fn file_names(folder: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(folder)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
