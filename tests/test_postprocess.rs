extern crate rm_detect;

use rm_detect::common::{Proposal, RmBox};
use rm_detect::detection_processing::{
    finalize_detections, generate_grids_and_strides, generate_proposals, nms_sorted_bboxes,
    qsort_descent_inplace, GridAnchor, DEFAULT_STRIDES,
};
use rm_detect::DetectError;

mod common;
use common::proposal;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn anchor_table_for_416() {
    let anchors = generate_grids_and_strides(416, 416, &DEFAULT_STRIDES);
    assert_eq!(anchors.len(), 52 * 52 + 26 * 26 + 13 * 13);
    assert_eq!(anchors.len(), 3549);

    assert_eq!(anchors[0], GridAnchor { grid_x: 0, grid_y: 0, stride: 8 });
    assert_eq!(anchors[1], GridAnchor { grid_x: 1, grid_y: 0, stride: 8 });
    assert_eq!(anchors[52], GridAnchor { grid_x: 0, grid_y: 1, stride: 8 });
    assert_eq!(anchors[2704], GridAnchor { grid_x: 0, grid_y: 0, stride: 16 });
    assert_eq!(anchors[3380], GridAnchor { grid_x: 0, grid_y: 0, stride: 32 });
    assert_eq!(anchors[3548], GridAnchor { grid_x: 12, grid_y: 12, stride: 32 });
}

#[test]
fn anchor_table_non_square() {
    let anchors = generate_grids_and_strides(64, 32, &[8, 16]);
    assert_eq!(anchors.len(), 8 * 4 + 4 * 2);
    assert_eq!(anchors[8], GridAnchor { grid_x: 0, grid_y: 1, stride: 8 });
    assert_eq!(anchors[32], GridAnchor { grid_x: 0, grid_y: 0, stride: 16 });
}

#[test]
fn anchor_table_is_deterministic() {
    assert_eq!(
        generate_grids_and_strides(416, 416, &DEFAULT_STRIDES),
        generate_grids_and_strides(416, 416, &DEFAULT_STRIDES)
    );
}

#[test]
fn decode_single_anchor() {
    let anchors = [GridAnchor { grid_x: 3, grid_y: 2, stride: 16 }];
    let feat = [0., 0., 0., 0., 1., 1.];
    let proposals = generate_proposals(&anchors, &feat, 1, 0.5).unwrap();

    assert_eq!(proposals.len(), 1);
    let p = proposals[0];
    assert_eq!(p.class_id, 0);
    assert_eq!(p.confidence, 1.);
    // center (48, 32), size 16
    assert!(approx(p.bbox.x, 40.) && approx(p.bbox.y, 24.), "{p:?}");
    assert!(approx(p.bbox.w, 16.) && approx(p.bbox.h, 16.), "{p:?}");
}

#[test]
fn decode_threshold_is_strict() {
    let anchors = [GridAnchor { grid_x: 0, grid_y: 0, stride: 8 }];

    let at = [0., 0., 0., 0., 1., 0.5];
    assert!(generate_proposals(&anchors, &at, 1, 0.5).unwrap().is_empty());

    let above = [0., 0., 0., 0., 1., 0.5 + 1e-4];
    assert_eq!(generate_proposals(&anchors, &above, 1, 0.5).unwrap().len(), 1);
}

#[test]
fn decode_multi_class_keeps_class_order() {
    let anchors = [GridAnchor { grid_x: 1, grid_y: 1, stride: 8 }];
    let feat = [0., 0., 0., 0., 1., 0.9, 0.1, 0.8];
    let proposals = generate_proposals(&anchors, &feat, 3, 0.5).unwrap();

    assert_eq!(proposals.iter().map(|p| p.class_id).collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(proposals[0].bbox, proposals[1].bbox);
}

#[test]
fn decode_rejects_wrong_length() {
    let anchors = generate_grids_and_strides(416, 416, &DEFAULT_STRIDES);
    let feat = vec![0f32; 3549 * 6 - 1];
    match generate_proposals(&anchors, &feat, 1, 0.1) {
        Err(DetectError::TensorShape { expected, actual }) => {
            assert_eq!(expected, 3549 * 6);
            assert_eq!(actual, 3549 * 6 - 1);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn decode_edge_inputs() {
    assert!(generate_proposals(&[], &[], 1, 0.1).unwrap().is_empty());

    let anchors = generate_grids_and_strides(416, 416, &DEFAULT_STRIDES);
    let zeros = vec![0f32; anchors.len() * 6];
    assert!(generate_proposals(&anchors, &zeros, 1, 0.1).unwrap().is_empty());
}

#[test]
fn sort_small_and_empty() {
    let mut empty: Vec<Proposal> = Vec::new();
    qsort_descent_inplace(&mut empty);
    assert!(empty.is_empty());

    let mut objects = vec![
        proposal(0., 0., 1., 1., 0.2),
        proposal(0., 0., 1., 1., 0.9),
        proposal(0., 0., 1., 1., 0.5),
    ];
    qsort_descent_inplace(&mut objects);
    let confs: Vec<f32> = objects.iter().map(|p| p.confidence).collect();
    assert_eq!(confs, vec![0.9, 0.5, 0.2]);
}

#[test]
fn sort_large_input_uses_every_element() {
    // deterministic pseudo-random confidences with many duplicates
    let mut seed: u32 = 12345;
    let mut objects: Vec<Proposal> = (0..10_000)
        .map(|i| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let conf = ((seed >> 16) % 500) as f32 / 500.;
            Proposal::new(RmBox::new(i as f32, 0., 1., 1.), i, conf)
        })
        .collect();
    let mut expected_ids: Vec<usize> = objects.iter().map(|p| p.class_id).collect();

    qsort_descent_inplace(&mut objects);

    assert!(objects.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    let mut ids: Vec<usize> = objects.iter().map(|p| p.class_id).collect();
    ids.sort_unstable();
    expected_ids.sort_unstable();
    assert_eq!(ids, expected_ids);
}

#[test]
fn nms_iou_equal_to_threshold_is_kept() {
    // overlap 50, union 150
    let objects = [proposal(0., 0., 10., 10., 0.9), proposal(5., 0., 10., 10., 0.8)];
    assert_eq!(nms_sorted_bboxes(&objects, 50. / 150.), vec![0, 1]);
    assert_eq!(nms_sorted_bboxes(&objects, 0.33), vec![0]);
}

#[test]
fn nms_identical_boxes_keep_the_first() {
    let objects = [proposal(10., 10., 20., 20., 0.9), proposal(10., 10., 20., 20., 0.8)];
    assert_eq!(nms_sorted_bboxes(&objects, 0.1), vec![0]);
}

#[test]
fn nms_zero_area_boxes_do_not_overlap() {
    let objects = [proposal(5., 5., 0., 0., 0.9), proposal(5., 5., 0., 0., 0.8)];
    assert_eq!(nms_sorted_bboxes(&objects, 0.0), vec![0, 1]);
}

#[test]
fn nms_is_idempotent() {
    let objects = [
        proposal(0., 0., 10., 10., 0.9),
        proposal(2., 2., 10., 10., 0.8),
        proposal(30., 30., 10., 10., 0.7),
        proposal(31., 30., 10., 10., 0.6),
        proposal(100., 100., 5., 5., 0.5),
    ];
    let picked = nms_sorted_bboxes(&objects, 0.3);
    assert_eq!(picked, vec![0, 2, 4]);

    let kept: Vec<Proposal> = picked.iter().map(|&i| objects[i]).collect();
    assert_eq!(nms_sorted_bboxes(&kept, 0.3), vec![0, 1, 2]);
}

#[test]
fn nms_empty() {
    let objects: [Proposal; 0] = [];
    assert!(nms_sorted_bboxes(&objects, 0.5).is_empty());
}

#[test]
fn finalize_clips_to_image() {
    let objects = [
        proposal(500., 10., 40., 20., 0.9),
        proposal(-50., -50., 20., 20., 0.8),
        proposal(400., 300., 100., 100., 0.7),
    ];
    let dets = finalize_detections(&objects, &[0, 1, 2], 416, 332, 1.);

    assert_eq!(dets[0].bbox, RmBox::new(415., 10., 0., 20.));
    assert_eq!(dets[1].bbox, RmBox::new(0., 0., 0., 0.));
    assert_eq!(dets[2].bbox, RmBox::new(400., 300., 15., 31.));
    for d in &dets {
        assert!(d.bbox.w >= 0. && d.bbox.h >= 0.);
        assert!(d.bbox.x_max() <= 415. && d.bbox.y_max() <= 331.);
    }
}

#[test]
fn finalize_maps_back_to_source_pixels() {
    let objects = [proposal(100., 142., 50., 50., 0.9)];
    let dets = finalize_detections(&objects, &[0], 416, 332, 0.325);

    // vertical offset (416 - 332) / 2 = 42
    let [tl, br] = dets[0].corners;
    assert!(approx(tl.x, 100. / 0.325) && approx(tl.y, 100. / 0.325), "{tl:?}");
    assert!(approx(br.x, 150. / 0.325) && approx(br.y, 150. / 0.325), "{br:?}");
    assert_eq!(dets[0].confidence, 0.9);
}

#[test]
fn finalize_follows_picked_order() {
    let objects = [
        proposal(0., 0., 10., 10., 0.9),
        proposal(20., 0., 10., 10., 0.8),
        proposal(40., 0., 10., 10., 0.7),
    ];
    let dets = finalize_detections(&objects, &[2, 0], 416, 416, 1.);
    assert_eq!(dets.len(), 2);
    assert_eq!(dets[0].confidence, 0.7);
    assert_eq!(dets[1].confidence, 0.9);
}
