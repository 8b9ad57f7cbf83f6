use std::fs::{self, OpenOptions};
use std::io::Write;

use quiz_core::model::ResultRecord;

use super::{FileRepository, mapping::format_result_line};
use crate::repository::{ResultRepository, StorageError};

impl ResultRepository for FileRepository {
    fn append_result(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let path = self.results_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", format_result_line(record))?;
        Ok(())
    }
}
