use tracing::debug;

/// Assign ordered items of the given sizes to `columns` columns.
///
/// Returns the column index for each item. Indices never decrease, so
/// reading columns left to right reproduces the input order, and no item
/// is split. Items fill a column until the next one would overflow
/// `ceil(total / columns)`. Whenever at least `columns` items exist, every
/// column receives at least one; with fewer items the greedy rule alone
/// applies and trailing columns may stay empty. A column count of 0 is
/// treated as 1.
pub fn assign_columns(sizes: &[usize], columns: usize) -> Vec<usize> {
    let columns = columns.max(1);
    let total: usize = sizes.iter().sum();
    let target = total.div_ceil(columns);
    let can_fill_every_column = sizes.len() >= columns;

    let mut assignment = Vec::with_capacity(sizes.len());
    let mut col = 0;
    let mut count_in_col = 0;

    for (i, &size) in sizes.iter().enumerate() {
        let remaining_items = sizes.len() - i;
        let remaining_cols = columns - col;
        let col_started = assignment.last() == Some(&col);

        let would_overflow = count_in_col + size > target;
        let balance_move = would_overflow && remaining_items >= remaining_cols;
        let starve_guard = can_fill_every_column && remaining_items < remaining_cols;

        if col_started && (balance_move || starve_guard) && col < columns - 1 {
            col += 1;
            count_in_col = 0;
        }

        assignment.push(col);
        count_in_col += size;
    }

    debug!(items = sizes.len(), columns, target, "Packed columns");
    assignment
}

/// Distribute ordered items into exactly `columns` columns without
/// splitting or reordering them. See [`assign_columns`].
pub fn pack_columns<T>(items: Vec<T>, columns: usize, size_of: impl Fn(&T) -> usize) -> Vec<Vec<T>> {
    let sizes: Vec<usize> = items.iter().map(&size_of).collect();
    let assignment = assign_columns(&sizes, columns);

    let mut packed: Vec<Vec<T>> = (0..columns.max(1)).map(|_| Vec::new()).collect();
    for (item, col) in items.into_iter().zip(assignment) {
        packed[col].push(item);
    }
    packed
}
