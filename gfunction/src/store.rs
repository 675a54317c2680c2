/*
MIT License
Copyright (c)  Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::GFunctionTable;
use communication::Error;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

/// The interpolator cache is process-wide on purpose: the tables are
/// large, and several scenarios usually share a handful of them.
fn cache() -> &'static Mutex<HashMap<String, Arc<GFunctionTable>>> {
    static CACHE: OnceLock<Mutex<HashMap<String, Arc<GFunctionTable>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// A keyed store of g-function datasets backed by a directory of JSON
/// files.
///
/// `get` is get-or-build: the first query for a dataset reads and
/// parses `<root>/<name>.json` under the cache guard. Later queries,
/// from any store pointing at the same directory, hand out the shared
/// [`Arc`], and interpolation on the returned table takes no locks.
#[derive(Debug, Clone)]
pub struct GFunctionStore {
    root: PathBuf,
}

impl GFunctionStore {
    /// A store over the given directory.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The directory this store reads from.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn cache_key(&self, name: &str) -> String {
        format!("{}::{}", self.root.display(), name)
    }

    /// Fetches a dataset by name, loading and building its interpolator
    /// on first use.
    pub fn get(&self, name: &str) -> Result<Arc<GFunctionTable>, Error> {
        let key = self.cache_key(name);
        let mut cache = cache().lock().map_err(|_| {
            Error::Io("the g-function cache is poisoned by an earlier panic".to_string())
        })?;
        if let Some(table) = cache.get(&key) {
            return Ok(Arc::clone(table));
        }

        let path = self.root.join(format!("{}.json", name));
        if !path.is_file() {
            return Err(Error::DatasetMissing(name.to_string()));
        }
        let data = std::fs::read_to_string(&path).map_err(|e| {
            Error::Io(format!("could not read '{}': {}", path.display(), e))
        })?;
        let value: serde_json::Value = serde_json::from_str(&data).map_err(|e| {
            Error::Io(format!("could not parse '{}': {}", path.display(), e))
        })?;
        let table = Arc::new(GFunctionTable::from_json_value(name, &value)?);
        log::info!(
            "loaded g-function dataset '{}' ({} time steps, H up to {} m)",
            name,
            table.time().len(),
            table.h_max()
        );
        cache.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Whether a dataset of this name can be served, without building
    /// it.
    pub fn contains(&self, name: &str) -> bool {
        let key = self.cache_key(name);
        if let Ok(cache) = cache().lock() {
            if cache.contains_key(&key) {
                return true;
            }
        }
        self.root.join(format!("{}.json", name)).is_file()
    }

    /// Registers an already-built table (e.g. a custom dataset computed
    /// offline) under its name, bypassing the filesystem.
    pub fn insert(&self, table: GFunctionTable) -> Result<Arc<GFunctionTable>, Error> {
        let key = self.cache_key(table.name());
        let table = Arc::new(table);
        let mut cache = cache().lock().map_err(|_| {
            Error::Io("the g-function cache is poisoned by an earlier panic".to_string())
        })?;
        cache.insert(key, Arc::clone(&table));
        Ok(table)
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dataset(dir: &std::path::Path, name: &str) {
        let json = serde_json::json!({
            "Time": [3600.0, 7200.0],
            "Data": { "100": [4.0, 5.0], "200": [5.0, 6.0] }
        });
        std::fs::write(
            dir.join(format!("{}.json", name)),
            serde_json::to_string(&json).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn missing_dataset_is_reported_by_name() {
        let store = GFunctionStore::new("/nonexistent-gfunction-dir");
        let err = store.get("14x2").unwrap_err();
        assert_eq!(err.tag(), "dataset_missing");
        assert!(err.to_string().contains("14x2"));
    }

    #[test]
    fn repeated_gets_share_one_table() {
        let dir = std::env::temp_dir().join("ghetool-store-test");
        std::fs::create_dir_all(&dir).unwrap();
        write_dataset(&dir, "shared");

        let store = GFunctionStore::new(&dir);
        let a = store.get("shared").unwrap();
        let b = store.get("shared").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(store.contains("shared"));

        // identical queries on the shared table are bit-identical
        let ga = a.g(&[5400.0], 150.0, 0.0, 0.0).unwrap();
        let gb = b.g(&[5400.0], 150.0, 0.0, 0.0).unwrap();
        assert_eq!(ga[0].to_bits(), gb[0].to_bits());
    }

    #[test]
    fn inserted_tables_are_served_from_the_cache() {
        let store = GFunctionStore::new("/nonexistent-gfunction-dir");
        let table = GFunctionTable::from_custom_parts(
            "offline",
            vec![3600.0, 7200.0],
            vec![120.0],
            vec![3.0, 4.0],
        )
        .unwrap();
        store.insert(table).unwrap();
        let fetched = store.get("offline").unwrap();
        assert!((fetched.h_max() - 120.0).abs() < 1e-9);
    }
}
