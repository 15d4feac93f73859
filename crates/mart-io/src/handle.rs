use std::path::{Path, PathBuf};
use std::sync::Arc;

use mart_core::{Dataset, LoadError};
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::loader;

/// Once-initialized, shared, read-only dataset.
///
/// The file is read on the first successful [`DatasetHandle::get`]; later
/// calls hand out the same `Arc` without touching the file again. A failed
/// load leaves the handle empty. The handle is passed explicitly to whoever
/// needs the data.
#[derive(Debug)]
pub struct DatasetHandle {
    path: PathBuf,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get(&self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(dataset) = self.cell.get() {
            debug!("dataset cache hit");
            return Ok(Arc::clone(dataset));
        }
        self.cell
            .get_or_try_init(|| loader::load(&self.path).map(Arc::new))
            .map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn second_get_returns_same_dataset_without_rereading() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(
            &path,
            "Invoice ID,Branch,City,Customer type,Gender,Product line,Unit price,Quantity,Tax 5%,Total,Date,Time,Payment,cogs,gross margin percentage,gross income,Rating\n\
             1,A,Yangon,Member,Female,Health and beauty,10,1,0.5,10.5,1/5/2019,13:08,Cash,10,4.76,0.5,7\n",
        )
        .unwrap();

        let handle = DatasetHandle::new(&path);
        assert!(!handle.is_loaded());
        let first = handle.get().unwrap();
        fs::remove_file(&path).unwrap();
        let second = handle.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn failed_load_leaves_handle_empty() {
        let handle = DatasetHandle::new("no/such/sales.csv");
        assert!(handle.get().is_err());
        assert!(!handle.is_loaded());
    }
}
