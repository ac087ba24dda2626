//! Provides tools and interfaces to integrate the crate's functionality with Python.

use std::sync::Arc;

use bincode::config;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::converter::Converter;
use crate::dfa::{Dfa, SubsetState};
use crate::dot;
use crate::nfa::Nfa;

#[pyclass(name = "SubsetDFA", module = "subset_dfa.subset_dfa_rs")]
#[derive(Clone, Debug, PartialEq)]
pub struct PySubsetDFA(Arc<Dfa>);

#[pymethods]
impl PySubsetDFA {
    #[new]
    fn __new__(py: Python<'_>, description: &str) -> PyResult<Self> {
        py.allow_threads(|| {
            description
                .parse::<Nfa>()
                .map(|nfa| PySubsetDFA(Arc::new(Converter::new(&nfa).convert())))
                .map_err(Into::into)
        })
    }

    fn get_start_state(&self) -> Vec<String> {
        self.0.get_start_state().members().to_vec()
    }

    fn get_states(&self) -> Vec<Vec<String>> {
        self.0
            .get_states()
            .iter()
            .map(|s| s.members().to_vec())
            .collect()
    }

    fn get_accepting_states(&self) -> Vec<Vec<String>> {
        self.0
            .get_accepting_states()
            .iter()
            .map(|s| s.members().to_vec())
            .collect()
    }

    fn get_transitions(&self) -> Vec<(Vec<String>, String, Vec<String>)> {
        self.0
            .transition_entries()
            .map(|(state, symbol, next)| {
                (
                    state.members().to_vec(),
                    symbol.to_string(),
                    next.members().to_vec(),
                )
            })
            .collect()
    }

    fn get_next_state(&self, state: Vec<String>, symbol: &str) -> Option<Vec<String>> {
        self.0
            .next_state(&SubsetState::new(state), symbol)
            .map(|next| next.members().to_vec())
    }

    fn is_accepting_state(&self, state: Vec<String>) -> bool {
        self.0.is_accepting_state(&SubsetState::new(state))
    }

    fn accepts(&self, inputs: Vec<String>) -> bool {
        self.0.accepts(inputs)
    }

    fn table(&self) -> String {
        self.0.to_string()
    }

    fn to_dot(&self) -> String {
        dot::dfa_to_dot(&self.0)
    }

    fn __repr__(&self) -> String {
        format!("{:#?}", self.0)
    }

    fn __str__(&self) -> String {
        format!("{}", self.0)
    }

    fn __eq__(&self, other: &PySubsetDFA) -> bool {
        *self.0 == *other.0
    }

    fn __deepcopy__(&self, _py: Python<'_>, _memo: Py<PyDict>) -> Self {
        PySubsetDFA(Arc::new((*self.0).clone()))
    }

    fn __reduce__(&self) -> PyResult<(PyObject, (Vec<u8>,))> {
        Python::with_gil(|py| {
            let cls = PyModule::import(py, "subset_dfa.subset_dfa_rs")?.getattr("SubsetDFA")?;
            let binary_data: Vec<u8> = bincode::encode_to_vec(&*self.0, config::standard())
                .map_err(|e| {
                    PyErr::new::<PyValueError, _>(format!(
                        "Serialization of SubsetDFA failed: {}",
                        e
                    ))
                })?;
            Ok((cls.getattr("from_binary")?.unbind(), (binary_data,)))
        })
    }

    #[staticmethod]
    fn from_binary(binary_data: Vec<u8>) -> PyResult<Self> {
        let (dfa, _): (Dfa, usize) =
            bincode::decode_from_slice(&binary_data[..], config::standard()).map_err(|e| {
                PyErr::new::<PyValueError, _>(format!(
                    "Deserialization of SubsetDFA failed: {}",
                    e
                ))
            })?;
        Ok(PySubsetDFA(Arc::new(dfa)))
    }
}

/// DOT text for the NFA a description denotes.
#[pyfunction]
fn nfa_to_dot(description: &str) -> PyResult<String> {
    let nfa: Nfa = description.parse()?;
    Ok(dot::nfa_to_dot(&nfa))
}

#[pymodule]
fn subset_dfa_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySubsetDFA>()?;
    m.add_function(wrap_pyfunction!(nfa_to_dot, m)?)?;

    Ok(())
}
