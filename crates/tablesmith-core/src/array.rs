//! Pure helpers over column data: cartesian products and transposition.

/// Cartesian product of a variable number of lists.
///
/// The product is ordered so that the first list's values cycle fastest and
/// the last list's values vary slowest. For zero input lists the product is a
/// single empty combination.
pub fn cartesian_product(lists: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut product: Vec<Vec<String>> = vec![Vec::new()];

    for list in lists {
        let mut next = Vec::with_capacity(product.len() * list.len());
        for value in list {
            for prefix in &product {
                let mut combination = Vec::with_capacity(prefix.len() + 1);
                combination.extend(prefix.iter().cloned());
                combination.push(value.clone());
                next.push(combination);
            }
        }
        product = next;
    }

    product
}

/// Transpose a rectangular matrix of strings.
///
/// Rows become columns and vice versa. An empty matrix transposes to an empty
/// matrix; ragged input is truncated to the shortest row.
pub fn transpose(matrix: &[Vec<String>]) -> Vec<Vec<String>> {
    let Some(first) = matrix.first() else {
        return Vec::new();
    };

    let width = matrix.iter().map(Vec::len).min().unwrap_or(first.len());
    let mut result = vec![Vec::with_capacity(matrix.len()); width];

    for row in matrix {
        for (x, value) in row.iter().take(width).enumerate() {
            result[x].push(value.clone());
        }
    }

    result
}
