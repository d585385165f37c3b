/// A 2D grid over the island's vertex lattice, row-major in z then x.
///
/// Unlike an equirectangular world map, an island square does not wrap:
/// out-of-range indices are a caller bug and panic.
#[derive(Clone)]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, x: usize, z: usize) -> usize {
        debug_assert!(x < self.width && z < self.height);
        z * self.width + x
    }

    pub fn get(&self, x: usize, z: usize) -> &T {
        &self.data[self.index(x, z)]
    }

    pub fn get_mut(&mut self, x: usize, z: usize) -> &mut T {
        let idx = self.index(x, z);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, z: usize, value: T) {
        let idx = self.index(x, z);
        self.data[idx] = value;
    }

    /// Fill the entire grid with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over all cells as (x, z, &value).
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (i % self.width, i / self.width, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip() {
        let mut grid = Grid::new_with(4, 3, 0.0f32);
        grid.set(2, 1, 7.5);
        assert_eq!(*grid.get(2, 1), 7.5);
        assert_eq!(*grid.get(0, 0), 0.0);
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut grid = Grid::new_with(2, 2, 0u32);
        grid.set(1, 0, 1);
        grid.set(0, 1, 2);
        grid.set(1, 1, 3);
        let cells: Vec<(usize, usize, u32)> =
            grid.iter().map(|(x, z, &v)| (x, z, v)).collect();
        assert_eq!(cells, vec![(0, 0, 0), (1, 0, 1), (0, 1, 2), (1, 1, 3)]);
    }

    #[test]
    fn test_fill() {
        let mut grid = Grid::new_with(3, 3, false);
        grid.fill(true);
        assert!(grid.iter().all(|(_, _, &v)| v));
    }
}
