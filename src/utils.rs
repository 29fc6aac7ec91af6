/// compute the product between a row vector and a matrix
pub fn dot(v: [f64; 3], m: [[f64; 3]; 3]) -> [f64; 3] {
    let mut out = [0f64; 3];
    for (i, out) in out.iter_mut().enumerate() {
        *out = v[0] * m[0][i] + v[1] * m[1][i] + v[2] * m[2][i]
    }
    out
}

/// compute the volume spanned by three vectors
pub fn triple_product(m: [[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
    + m[0][1] * (m[1][2] * m[2][0] - m[1][0] * m[2][2])
    + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// calculates the inverse of a 3x3 lattice
pub fn invert_lattice(lattice: &[[f64; 3]; 3])
                      -> Result<[[f64; 3]; 3], String> {
    let determinant = triple_product(*lattice);
    if determinant.abs() < 1e-16 {
        return Err(String::from("Lattice doesn't span 3D space"));
    }
    let l = lattice;
    let cofactor = |r1: usize, r2: usize, c1: usize, c2: usize| {
        (l[r1][c1] * l[r2][c2] - l[r1][c2] * l[r2][c1]) / determinant
    };
    // inverse[i][j] is the cofactor of element [j][i]
    Ok([[cofactor(1, 2, 1, 2), cofactor(2, 0, 1, 2), cofactor(0, 1, 1, 2)],
        [cofactor(1, 2, 2, 0), cofactor(2, 0, 2, 0), cofactor(0, 1, 2, 0)],
        [cofactor(1, 2, 0, 1), cofactor(2, 0, 0, 1), cofactor(0, 1, 0, 1)]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utils_dot() {
        assert_eq!(dot([1., 2., 3.],
                       [[1., 0., 0.], [0., 2., 0.], [0., 0., 3.]]),
                   [1., 4., 9.])
    }

    #[test]
    fn utils_triple_product() {
        let lattice = [[2., 0., 0.], [1., 3., 0.], [0., 0., 4.]];
        assert_eq!(triple_product(lattice), 24.)
    }

    #[test]
    fn utils_invert_lattice() {
        let lattice = [[2., 0., 0.], [1., 4., 0.], [0., 1., 5.]];
        let inverse = invert_lattice(&lattice).unwrap();
        for i in 0..3 {
            let row = dot(lattice[i], inverse);
            for (j, value) in row.iter().enumerate() {
                let expected = if i == j { 1. } else { 0. };
                assert!((value - expected).abs() < 1e-12)
            }
        }
    }

    #[test]
    fn utils_invert_lattice_flat() {
        let lattice = [[1., 0., 0.], [0., 1., 0.], [1., 1., 0.]];
        assert!(invert_lattice(&lattice).is_err())
    }
}
