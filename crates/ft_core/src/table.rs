//! crates/ft_core/src/table.rs
//! Typed tables with fixed axis order.
//!
//! `Table<R, C, V>` stores one cell per (row, column) in row-major order. Row
//! and column orders are fixed at construction and every consumer iterates in
//! that order, which is what keeps downstream output reproducible.
//! `Series<K, V>` is the one-dimensional counterpart (weights, ideals, scores).

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::errors::CoreError;

/* -------------------------------------------------------------------------- */
/*                                    Table                                   */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq)]
pub struct Table<R, C, V> {
    rows: Vec<R>,
    cols: Vec<C>,
    row_index: BTreeMap<R, usize>,
    col_index: BTreeMap<C, usize>,
    cells: Vec<V>,
}

fn index_axis<K: Ord + Clone + Display>(keys: &[K]) -> Result<BTreeMap<K, usize>, CoreError> {
    let mut idx = BTreeMap::new();
    for (i, k) in keys.iter().enumerate() {
        if idx.insert(k.clone(), i).is_some() {
            return Err(CoreError::DuplicateKey(k.to_string()));
        }
    }
    Ok(idx)
}

impl<R, C, V> Table<R, C, V>
where
    R: Ord + Clone + Display,
    C: Ord + Clone + Display,
{
    /// Build a table by evaluating `f` for every cell, row-major.
    /// The first error aborts construction.
    pub fn try_from_fn<E, F>(rows: Vec<R>, cols: Vec<C>, mut f: F) -> Result<Self, E>
    where
        E: From<CoreError>,
        F: FnMut(&R, &C) -> Result<V, E>,
    {
        let row_index = index_axis(&rows)?;
        let col_index = index_axis(&cols)?;
        let mut cells = Vec::with_capacity(rows.len() * cols.len());
        for r in &rows {
            for c in &cols {
                cells.push(f(r, c)?);
            }
        }
        Ok(Self { rows, cols, row_index, col_index, cells })
    }

    /// Transform every cell, keeping both axes.
    pub fn try_map<W, E, F>(&self, mut f: F) -> Result<Table<R, C, W>, E>
    where
        F: FnMut(&R, &C, &V) -> Result<W, E>,
    {
        let ncols = self.cols.len();
        let mut cells = Vec::with_capacity(self.cells.len());
        for (i, v) in self.cells.iter().enumerate() {
            let (ri, ci) = (i / ncols, i % ncols);
            cells.push(f(&self.rows[ri], &self.cols[ci], v)?);
        }
        Ok(Table {
            rows: self.rows.clone(),
            cols: self.cols.clone(),
            row_index: self.row_index.clone(),
            col_index: self.col_index.clone(),
            cells,
        })
    }

    #[inline] pub fn rows(&self) -> &[R] { &self.rows }
    #[inline] pub fn cols(&self) -> &[C] { &self.cols }
    #[inline] pub fn n_rows(&self) -> usize { self.rows.len() }
    #[inline] pub fn n_cols(&self) -> usize { self.cols.len() }

    #[inline] pub fn row_pos(&self, r: &R) -> Option<usize> { self.row_index.get(r).copied() }
    #[inline] pub fn col_pos(&self, c: &C) -> Option<usize> { self.col_index.get(c).copied() }

    /// Cell by positions. Panics on out-of-range positions, like slice indexing.
    #[inline]
    pub fn at(&self, ri: usize, ci: usize) -> &V {
        &self.cells[ri * self.cols.len() + ci]
    }

    pub fn get(&self, r: &R, c: &C) -> Option<&V> {
        let ri = self.row_pos(r)?;
        let ci = self.col_pos(c)?;
        Some(self.at(ri, ci))
    }

    /// One row as `(column, cell)` pairs in column order.
    pub fn row(&self, ri: usize) -> impl Iterator<Item = (&C, &V)> + '_ {
        let n = self.cols.len();
        self.cols.iter().zip(self.cells[ri * n..(ri + 1) * n].iter())
    }

    /// One column as `(row, cell)` pairs in row order.
    pub fn column(&self, ci: usize) -> impl Iterator<Item = (&R, &V)> + '_ {
        let n = self.cols.len();
        self.rows
            .iter()
            .enumerate()
            .map(move |(ri, r)| (r, &self.cells[ri * n + ci]))
    }
}

/* -------------------------------------------------------------------------- */
/*                                   Series                                   */
/* -------------------------------------------------------------------------- */

/// Ordered keyed vector. Iteration follows insertion order; lookup is by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<K, V> {
    entries: Vec<(K, V)>,
    index: BTreeMap<K, usize>,
}

impl<K, V> Series<K, V>
where
    K: Ord + Clone + Display,
{
    pub fn from_entries<I: IntoIterator<Item = (K, V)>>(it: I) -> Result<Self, CoreError> {
        let entries: Vec<(K, V)> = it.into_iter().collect();
        let mut index = BTreeMap::new();
        for (i, (k, _)) in entries.iter().enumerate() {
            if index.insert(k.clone(), i).is_some() {
                return Err(CoreError::DuplicateKey(k.to_string()));
            }
        }
        Ok(Self { entries, index })
    }

    #[inline]
    pub fn get(&self, k: &K) -> Option<&V> {
        self.index.get(k).map(|&i| &self.entries[i].1)
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }
}
