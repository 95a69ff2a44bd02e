use quickcheck::quickcheck;

use multiarray::prelude::*;
use multiarray::{execute, indices};

fn shape3(a: u8, b: u8, c: u8) -> [usize; 3] {
    [a as usize % 5, b as usize % 5, c as usize % 5]
}

fn numbered(shape: &[usize]) -> MultiArray<usize> {
    MultiArray::from_shape_fn(shape, |ix| ix.iter().fold(0, |acc, &i| acc * 10 + i)).unwrap()
}

quickcheck! {
    fn for_each_visits_in_buffer_order(a: u8, b: u8, c: u8) -> bool {
        let shape = shape3(a, b, c);
        let array = numbered(&shape);
        let mut offsets = Vec::new();
        array.for_each(|index, &value| {
            offsets.push(index.iter().zip(array.strides()).map(|(i, s)| i * s).sum::<usize>());
            assert_eq!(value, index.iter().fold(0, |acc, &i| acc * 10 + i));
        });
        offsets == (0..array.len()).collect::<Vec<_>>() && indices(&shape).len() == array.len()
    }

    fn reshape_round_trips(a: u8, b: u8, c: u8) -> bool {
        let shape = shape3(a, b, c);
        let array = numbered(&shape);
        if array.is_empty() {
            return true;
        }
        let flat = array.reshape(&[-1]).unwrap();
        let back = flat.reshape(&[shape[0] as isize, -1, shape[2] as isize]).unwrap();
        flat.len() == array.len() && back == array && back.shares_storage_with(&array)
    }

    fn transpose_is_an_involution(a: u8, b: u8, c: u8, i: u8, j: u8) -> bool {
        let array = numbered(&shape3(a, b, c));
        let (i, j) = (i as usize % 3, j as usize % 3);
        let once = array.transposed(i, j).unwrap();
        let mut swapped = array.shape().to_vec();
        swapped.swap(i, j);
        once.shape() == &swapped[..] && once.transposed(i, j).unwrap() == array
    }

    fn whole_slices_are_identity(a: u8, b: u8, c: u8) -> bool {
        let shape = shape3(a, b, c);
        let array = numbered(&shape);
        let ranges = shape.iter().map(|&d| Some(0..d));
        array.sliced(ranges).unwrap() == array && array.sliced([None, None, None]).unwrap() == array
    }

    fn fused_chain_matches_steps(a: u8, b: u8, c: u8, lo: u8, i: u8) -> bool {
        let shape = shape3(a, b, c);
        let array = numbered(&shape);
        let i = i as usize % 3;
        let start = (lo as usize % 5).min(shape[1]);
        let items = vec![
            WorkItem::Slice(vec![None, Some(start..shape[1]), None]),
            WorkItem::Transpose(0, i),
            WorkItem::Reshape(vec![-1]),
        ];
        if array.is_empty() {
            return true;
        }
        let fused = execute(&array, &items).unwrap();

        let sliced_shape = [shape[0], shape[1] - start, shape[2]];
        let sliced = MultiArray::from_shape_fn(&sliced_shape, |ix| array[[ix[0], ix[1] + start, ix[2]]]).unwrap();
        let mut transposed_shape = sliced_shape;
        transposed_shape.swap(0, i);
        let transposed = MultiArray::from_shape_fn(&transposed_shape, |ix| {
            let mut source = [ix[0], ix[1], ix[2]];
            source.swap(0, i);
            sliced[source]
        })
        .unwrap();
        fused == transposed.reshape(&[-1]).unwrap()
    }
}
