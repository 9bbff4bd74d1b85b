pub mod apriori;

#[cfg(feature = "python")]
mod python {
    use crate::apriori::{apriori_algorithm, discover_unique_combinations, FrequentLevel};
    use numpy::ndarray::{Array2, Axis};
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::{pymodule, types::PyModule, Bound, PyResult, Python};

    fn level_to_array(level: &FrequentLevel) -> PyResult<Array2<usize>> {
        let itemset_size = level.itemset_size;
        let num_itemsets = level.len();
        let mut data = vec![0usize; num_itemsets * itemset_size];

        for (i, itemset) in level.iter_itemsets().enumerate() {
            for (j, &item) in itemset.iter().enumerate() {
                data[i * itemset_size + j] = item;
            }
        }

        Array2::from_shape_vec((num_itemsets, itemset_size), data)
            .map_err(|_| pyo3::exceptions::PyValueError::new_err("Failed to create array"))
    }

    #[pymodule]
    fn levelwise<'py>(m: &Bound<'py, PyModule>) -> PyResult<()> {
        #[pyfn(m)]
        #[pyo3(name = "apriori")]
        fn apriori_py<'py>(
            py: Python<'py>,
            transactions: PyReadonlyArray2<'py, i32>,
            min_support: f64,
        ) -> PyResult<Vec<Bound<'py, PyArray2<usize>>>> {
            let frequent_levels = apriori_algorithm(transactions.as_array(), min_support)
                .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;

            frequent_levels
                .iter()
                .map(|level| Ok(level_to_array(level)?.into_pyarray(py)))
                .collect()
        }

        #[pyfn(m)]
        #[pyo3(name = "unique_column_combinations", signature = (table, names = None))]
        fn unique_column_combinations_py(
            table: PyReadonlyArray2<i64>,
            names: Option<Vec<String>>,
        ) -> PyResult<Vec<Vec<String>>> {
            let table = table.as_array();
            let num_columns = table.shape()[1];
            let names = names.unwrap_or_else(|| (0..num_columns).map(|i| i.to_string()).collect());
            if names.len() != num_columns {
                return Err(pyo3::exceptions::PyValueError::new_err(format!(
                    "Expected {} column names, got {}",
                    num_columns,
                    names.len()
                )));
            }

            let columns: Vec<(String, Vec<i64>)> = names
                .into_iter()
                .zip(table.axis_iter(Axis(1)))
                .map(|(name, column)| (name, column.to_vec()))
                .collect();

            let uccs = discover_unique_combinations(&columns)
                .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;

            Ok(uccs
                .names()
                .into_iter()
                .map(|combination| combination.into_iter().cloned().collect())
                .collect())
        }

        Ok(())
    }
}
