#![no_main]

use arbitrary::{Arbitrary, Unstructured};

use beachline::queue::PriorityQueue;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Push { item: u8, key: u8 },
    Pop,
    Invalidate { item: u8 },
}

/// The obvious quadratic queue: a list of (key, seq, item), scanned on every pop.
#[derive(Default)]
struct Reference {
    entries: Vec<(u8, u64, u8)>,
    seq: u64,
}

impl Reference {
    fn push(&mut self, item: u8, key: u8) -> bool {
        if self.entries.iter().any(|e| e.2 == item) {
            return false;
        }
        self.entries.push((key, self.seq, item));
        self.seq += 1;
        true
    }

    fn pop(&mut self) -> Option<(u8, u8)> {
        let (idx, _) = self
            .entries
            .iter()
            .enumerate()
            .min_by_key(|(_, (key, seq, _))| (*key, *seq))?;
        let (key, _, item) = self.entries.remove(idx);
        Some((key, item))
    }

    fn invalidate(&mut self, item: u8) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.2 != item);
        before != self.entries.len()
    }
}

fn arbitrary_ops(mut u: Unstructured) -> Result<(), arbitrary::Error> {
    let len = u.arbitrary_len::<Op>()?;
    let mut queue = PriorityQueue::new();
    let mut reference = Reference::default();
    for _ in 0..len {
        match u.arbitrary()? {
            Op::Push { item, key } => {
                assert_eq!(queue.push(item, key as f64), reference.push(item, key));
            }
            Op::Pop => {
                let actual = queue.pop().ok().map(|(key, item)| (key as u8, item));
                assert_eq!(actual, reference.pop());
            }
            Op::Invalidate { item } => {
                assert_eq!(queue.invalidate(&item), reference.invalidate(item));
            }
        }
        assert_eq!(queue.len(), reference.entries.len());
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let u = Unstructured::new(data);
    let _ = arbitrary_ops(u);
});
