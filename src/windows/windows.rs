use crate::*;

/// Fixed training set cut from a history, plus the window to predict from.
///
/// With depth `W` and history `H`, example `i ∈ [0, W)` pairs
/// - target `H[W-1-i]`
/// - input `H[2W-1-i-j]` for `j ∈ [0, W)`, flattened six scalars at a time
///
/// so each input is the `W` consecutive draws adjacent to its target, and the
/// whole set slides one position per example. The prediction window
/// continues the pattern one step further: `H[W-1-j]` for `j ∈ [0, W)`.
///
/// Only the first `2W` entries of the history are ever read.
#[derive(Debug, Clone, PartialEq)]
pub struct Windows {
    depth: usize,
    inputs: Vec<Vec<Scalar>>,
    targets: Vec<[Scalar; DRAW_SIZE]>,
    latest: Vec<Scalar>,
}

impl Windows {
    /// Cut `depth` examples out of `history`.
    /// Needs at least `2 * depth` draws; shorter histories are never truncated.
    pub fn build(history: &History, depth: usize) -> Result<Self, Error> {
        if depth == 0 {
            return Err(Error::Depth);
        }
        let needed = 2 * depth;
        if history.len() < needed {
            return Err(Error::ShortHistory {
                found: history.len(),
                depth,
                needed,
            });
        }
        let window = |end: usize| -> Vec<Scalar> {
            (0..depth)
                .map(|j| &history[end - j])
                .flat_map(|draw| draw.scalars())
                .collect()
        };
        let inputs = (0..depth)
            .map(|i| window(needed - 1 - i))
            .collect::<Vec<Vec<Scalar>>>();
        let targets = (0..depth)
            .map(|i| history[depth - 1 - i].scalars())
            .collect::<Vec<[Scalar; DRAW_SIZE]>>();
        let latest = window(depth - 1);
        log::debug!(
            "{:<32}{:<32}",
            "built windows",
            format!("{} x {}", depth, depth * DRAW_SIZE)
        );
        Ok(Self {
            depth,
            inputs,
            targets,
            latest,
        })
    }

    /// Window depth, which is also the number of examples.
    pub fn depth(&self) -> usize {
        self.depth
    }
    /// Width of every input vector.
    pub fn width(&self) -> usize {
        self.depth * DRAW_SIZE
    }
    pub fn inputs(&self) -> &[Vec<Scalar>] {
        &self.inputs
    }
    pub fn targets(&self) -> &[[Scalar; DRAW_SIZE]] {
        &self.targets
    }
    /// Input window the final prediction is computed from.
    pub fn latest(&self) -> &[Scalar] {
        &self.latest
    }
    /// (input, target) pairs in example order.
    pub fn examples(&self) -> impl Iterator<Item = (&[Scalar], &[Scalar; DRAW_SIZE])> {
        self.inputs
            .iter()
            .map(|x| x.as_slice())
            .zip(self.targets.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Draw `k` is `[k+1, k+2, ..]` so every position is recognizable.
    fn numbered(n: usize) -> History {
        (0..n as Ball)
            .map(|k| Draw::from(std::array::from_fn::<Ball, DRAW_SIZE, _>(|f| k + 1 + f as Ball)))
            .collect::<Vec<Draw>>()
            .into()
    }

    fn first(window: &[Scalar], slot: usize) -> Ball {
        window[slot * DRAW_SIZE] as Ball - 1
    }

    #[test]
    fn shapes() {
        let windows = Windows::build(&numbered(40), 20).unwrap();
        assert_eq!(windows.depth(), 20);
        assert_eq!(windows.inputs().len(), 20);
        assert_eq!(windows.targets().len(), 20);
        assert!(windows.inputs().iter().all(|x| x.len() == 120));
        assert_eq!(windows.latest().len(), 120);
    }

    #[test]
    fn index_formula() {
        let w = 20;
        let history = numbered(2 * w);
        let windows = Windows::build(&history, w).unwrap();
        for i in 0..w {
            assert_eq!(windows.targets()[i], history[w - 1 - i].scalars());
            for j in 0..w {
                assert_eq!(first(&windows.inputs()[i], j) as usize, 2 * w - 1 - i - j);
            }
        }
        for j in 0..w {
            assert_eq!(first(windows.latest(), j) as usize, w - 1 - j);
        }
    }

    #[test]
    fn fields_stay_in_order() {
        let windows = Windows::build(&numbered(4), 2).unwrap();
        // example 0 reads H[3] then H[2]
        assert_eq!(
            windows.inputs()[0],
            vec![4., 5., 6., 7., 8., 9., 3., 4., 5., 6., 7., 8.]
        );
        assert_eq!(windows.targets()[0], [2., 3., 4., 5., 6., 7.]);
    }

    #[test]
    fn examples_slide_by_one() {
        let windows = Windows::build(&numbered(10), 5).unwrap();
        for pair in windows.inputs().windows(2) {
            assert_eq!(pair[0][DRAW_SIZE..], pair[1][..pair[1].len() - DRAW_SIZE]);
        }
    }

    #[test]
    fn deterministic() {
        let history: History = (0..40).map(|_| Draw::random()).collect::<Vec<Draw>>().into();
        let a = Windows::build(&history, 20).unwrap();
        let b = Windows::build(&history, 20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reads_only_first_two_windows() {
        let a = Windows::build(&numbered(40), 20).unwrap();
        let b = Windows::build(&numbered(55), 20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn short_history_fails() {
        match Windows::build(&numbered(39), 20) {
            Err(Error::ShortHistory {
                found,
                depth,
                needed,
            }) => assert_eq!((found, depth, needed), (39, 20, 40)),
            other => panic!("expected short history, got {:?}", other),
        }
        assert!(Windows::build(&numbered(40), 20).is_ok());
    }

    #[test]
    fn zero_depth_fails() {
        assert!(matches!(
            Windows::build(&numbered(4), 0),
            Err(Error::Depth)
        ));
    }
}
