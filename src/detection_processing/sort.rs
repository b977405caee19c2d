use crate::detection_processing::Nms;

/// Below this length a partition is sorted sequentially instead of being
/// split further across the rayon pool.
pub const PARALLEL_CUTOFF: usize = 256;

/// Sorts by confidence, highest first. Equal confidences may be reordered.
pub fn qsort_descent_inplace<T: Nms + Send>(objects: &mut [T]) {
    if objects.is_empty() {
        return;
    }
    qsort_descent(objects);
}

fn qsort_descent<T: Nms + Send>(objects: &mut [T]) {
    if objects.len() <= PARALLEL_CUTOFF {
        objects.sort_unstable_by(|a, b| b.confidence().total_cmp(&a.confidence()));
        return;
    }

    // Hoare partition around the middle element
    let p = objects[(objects.len() - 1) / 2].confidence();
    let mut i: isize = 0;
    let mut j: isize = objects.len() as isize - 1;
    while i <= j {
        while objects[i as usize].confidence() > p {
            i += 1;
        }
        while objects[j as usize].confidence() < p {
            j -= 1;
        }
        if i <= j {
            objects.swap(i as usize, j as usize);
            i += 1;
            j -= 1;
        }
    }

    // [0, j] and [i, len) are disjoint; anything between equals the pivot
    let (left, rest) = objects.split_at_mut((j + 1) as usize);
    let right = &mut rest[(i - j - 1) as usize..];
    rayon::join(|| qsort_descent(left), || qsort_descent(right));
}
