// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap tests and the bounds index.
//!
//! Shows why entering and leaving use different paddings: a box resting 8
//! units from a candidate is "over" it with an enter padding of 10, and stays
//! "in" with a leave padding of 10 measured against the cached container.
//!
//! Run:
//! - `cargo run -p understory_demos --example overlap_basics`

use understory_overlap::{BoundingBox, BoundsIndex, expand, overlaps, union};

fn main() {
    let dragged = BoundingBox::from_xywh(0.0_f64, 0.0, 10.0, 10.0);
    let near = BoundingBox::from_xywh(18.0, 0.0, 10.0, 10.0);
    let far = BoundingBox::from_xywh(60.0, 0.0, 10.0, 10.0);

    println!("== Raw overlap ==");
    println!("  dragged vs near: {}", overlaps(&dragged, &near));
    println!("  dragged vs far:  {}", overlaps(&dragged, &far));

    let padded = expand(&dragged, 10.0);
    println!("== Padded by 10 ==\n  {padded:?}");
    println!("  padded vs near: {}", overlaps(&padded, &near));
    assert!(overlaps(&padded, &near));
    assert!(!overlaps(&padded, &far));

    // A container around `near` and `far`, as a host would compute it.
    let container = expand(&union(&near, &far), 5.0);
    println!("== Container ==\n  {container:?} ({} wide)", container.width());

    let mut index: BoundsIndex<&str, f64> = BoundsIndex::new();
    index.rebuild([("near", near), ("far", far), ("container", container)]);
    let hits: Vec<_> = index.overlapping(&padded).map(|t| t.node).collect();
    println!("== Index scan ==\n  {hits:?}");
    assert_eq!(hits, vec!["near", "container"]);

    // Entries are snapshots: moving a node does not move its entry.
    index.remove("near");
    assert!(index.push("near", BoundingBox::from_xywh(200.0, 0.0, 10.0, 10.0)));
    let hits: Vec<_> = index.overlapping(&padded).map(|t| t.node).collect();
    println!("== After re-indexing `near` ==\n  {hits:?}");
    assert_eq!(hits, vec!["container"]);
}
