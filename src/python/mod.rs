use crate::chain::digest::{digest_input, sha256};
use crate::chain::ChainStore;
use crate::core::{ChainConfig, Error, HashLabel};
use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use tokio::runtime::Runtime;

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::OutOfRange { .. } => PyErr::new::<PyIndexError, _>(err.to_string()),
        _ => PyErr::new::<PyValueError, _>(err.to_string()),
    }
}

// --- Chain Bindings ---

#[pyclass(name = "ChainStore")]
pub struct PyChainStore {
    runtime: Runtime,
    inner: ChainStore,
}

#[pymethods]
impl PyChainStore {
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<String>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => ChainConfig::from_json(&json).map_err(to_py_err)?,
            None => ChainConfig::default(),
        };
        let runtime = Runtime::new()
            .map_err(|e| PyErr::new::<PyRuntimeError, _>(e.to_string()))?;
        Ok(PyChainStore {
            runtime,
            inner: ChainStore::new(config).map_err(to_py_err)?,
        })
    }

    #[pyo3(signature = (data=String::new()))]
    fn append(&mut self, data: String) -> usize {
        self.runtime.block_on(self.inner.append(data))
    }

    fn edit(&mut self, index: usize, data: String) -> PyResult<bool> {
        self.runtime
            .block_on(self.inner.edit(index, data))
            .map_err(to_py_err)
    }

    fn save(&mut self, index: usize) -> PyResult<Option<usize>> {
        self.runtime.block_on(self.inner.save(index)).map_err(to_py_err)
    }

    /// Returns the removed block's data.
    fn delete(&mut self, index: usize) -> PyResult<String> {
        let removed = self
            .runtime
            .block_on(self.inner.delete(index))
            .map_err(to_py_err)?;
        Ok(removed.data().to_string())
    }

    fn recompute_from(&mut self, start_index: usize) {
        self.runtime.block_on(self.inner.recompute_from(start_index))
    }

    fn is_editable(&self, index: usize) -> bool {
        self.inner.is_editable(index)
    }

    fn verify(&self) -> bool {
        self.runtime.block_on(self.inner.verify()).valid
    }

    fn snapshot_json(&self) -> PyResult<String> {
        self.inner.snapshot().to_json().map_err(to_py_err)
    }

    #[getter]
    fn get_version(&self) -> u64 {
        self.inner.version()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// Hash label for a block, computed without a store.
#[pyfunction]
fn block_hash(position: usize, previous_link: &str, data: &str) -> String {
    let input = digest_input(position, &HashLabel::from(previous_link), data);
    HashLabel::from_digest(&sha256(input.as_bytes())).to_string()
}

// --- Module ---

#[pymodule]
fn hashchain_lab(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyChainStore>()?;
    m.add_function(wrap_pyfunction!(block_hash, m)?)?;
    Ok(())
}
