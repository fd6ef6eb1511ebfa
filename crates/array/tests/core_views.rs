//! Integration tests for geometry and value access

use num_complex::Complex;
use rstest::{fixture, rstest};
use voxtools_array::{
    Axis, ComplexVoxelArray, Error, Geometry, MergePolicy, MergeStatus, Order, ValueAccess,
    ValueAccessMut, VoxelArray, VoxelArrayMut, VoxelData,
};

#[fixture]
fn ramp() -> VoxelData<u32> {
    VoxelData::new((0..30).collect(), [2, 3, 5], [1.0, 1.0, 1.0]).unwrap()
}

#[fixture]
fn spiky() -> VoxelData<i32> {
    VoxelData::new(vec![1, 5, 2, 9, 0], [5, 1, 1], [1.0, 1.0, 1.0]).unwrap()
}

#[rstest]
#[case([2, 3, 5], Order::RowMajor)] // case 1
#[case([2, 3, 5], Order::ColumnMajor)] // case 2
#[case([1, 1, 1], Order::RowMajor)] // case 3
#[case([7, 1, 4], Order::ColumnMajor)] // case 4
#[case([4, 6, 3], Order::RowMajor)] // case 5
fn index_round_trip(#[case] shape: [usize; 3], #[case] order: Order) {
    let geometry = Geometry::new(shape, [1.0; 3]).unwrap().with_order(order);

    for x in 0..shape[0] {
        for y in 0..shape[1] {
            for z in 0..shape[2] {
                let index = geometry.to_index([x, y, z]).unwrap();
                assert_eq!(geometry.from_index(index).unwrap(), [x, y, z]);
            }
        }
    }

    // every index is hit exactly once
    let mut seen = (0..geometry.len())
        .map(|i| geometry.from_index(i).unwrap())
        .map(|c| geometry.to_index(c).unwrap())
        .collect::<Vec<usize>>();
    seen.sort();
    assert_eq!(seen, (0..geometry.len()).collect::<Vec<usize>>());
}

#[rstest]
#[case(Order::RowMajor)] // case 1
#[case(Order::ColumnMajor)] // case 2
fn known_index(#[case] order: Order) {
    let geometry = Geometry::new([2, 3, 5], [1.0; 3]).unwrap().with_order(order);
    assert_eq!(geometry.to_index([1, 2, 4]).unwrap(), 29);
}

#[rstest]
fn clear_crop_restores_raw_shape(ramp: VoxelData<u32>) {
    let mut array = VoxelArray::new(&ramp);
    array.crop(0, 1, 1, 3, 2, 4).unwrap();
    assert!(array.is_cropped());
    assert_eq!(array.shape(), [1, 2, 2]);

    array.clear_crop();
    assert!(!array.is_cropped());
    assert_eq!(array.shape(), [2, 3, 5]);
    assert_eq!(array.crop_window(), None);
}

#[rstest]
fn failed_crop_changes_nothing(ramp: VoxelData<u32>) {
    let mut array = VoxelArray::new(&ramp);
    array.crop_y(1, 2).unwrap();
    let before = array.crop_window();

    let result = array.crop(0, 2, 0, 3, 4, 6);
    assert!(matches!(
        result,
        Err(Error::InvalidCropWindow { axis: Axis::Z, .. })
    ));
    assert_eq!(array.crop_window(), before);
}

#[rstest]
fn toggled_crop_keeps_bounds(ramp: VoxelData<u32>) {
    let mut array = VoxelArray::new(&ramp);
    array.crop_z(1, 4).unwrap();

    array.set_cropped_active(false);
    assert_eq!(array.shape(), [2, 3, 5]);

    array.set_cropped_active(true);
    assert_eq!(array.shape(), [2, 3, 3]);
}

#[rstest]
#[case(10, 5, MergeStatus::Exact)] // case 1
#[case(11, 5, MergeStatus::Truncated { remainder: [0, 0, 1] })] // case 2
#[case(12, 6, MergeStatus::Exact)] // case 3
#[case(3, 1, MergeStatus::Truncated { remainder: [0, 0, 1] })] // case 4
fn merge_by_two(#[case] extent: usize, #[case] merged: usize, #[case] status: MergeStatus) {
    let mut geometry = Geometry::new([1, 1, extent], [1.0; 3]).unwrap();
    assert_eq!(geometry.merge_axis(Axis::Z, 2).unwrap(), status);
    assert_eq!(geometry.merged_shape()[2], merged);
    assert_eq!(geometry.shape_z(), merged);
}

#[rstest]
fn strict_merge_refuses_remainder() {
    let mut geometry = Geometry::new([11, 1, 1], [1.0; 3])
        .unwrap()
        .with_merge_policy(MergePolicy::Strict);

    assert_eq!(
        geometry.merge_x(2),
        Err(Error::NonDivisibleMerge {
            axis: Axis::X,
            block: 2,
            extent: 11,
            remainder: 1
        })
    );
    assert!(!geometry.is_merged());
}

#[rstest]
fn merged_voxel_size() {
    let mut geometry = Geometry::new([4, 6, 8], [1.0, 1.0, 1.0]).unwrap();
    geometry.merge(2, 2, 2).unwrap();

    assert_eq!(geometry.voxel_size().as_slice(), &[1.0, 1.0, 1.0]);
    assert_eq!(geometry.spacing(), [2.0, 2.0, 2.0]);
    assert_eq!(geometry.shape(), [2, 3, 4]);
}

#[rstest]
fn merge_wins_over_crop(ramp: VoxelData<u32>) {
    let mut array = VoxelArray::new(&ramp);
    array.crop_z(0, 4).unwrap();
    array.merge_z(2).unwrap();
    assert_eq!(array.shape(), [2, 3, 2]);

    array.clear_merge();
    assert_eq!(array.shape(), [2, 3, 4]);
}

#[rstest]
fn positions_use_raw_geometry() {
    let mut geometry = Geometry::new([4, 2, 3], [0.5, 1.0, 2.0]).unwrap();
    geometry.crop_x(2, 4).unwrap();
    geometry.merge_y(2).unwrap();

    assert_eq!(geometry.position_x(0), -1.0);
    assert_eq!(geometry.position_y(1), 0.0);
    assert_eq!(geometry.position_z(3), 3.0);
    assert_eq!(geometry.position([0, 1, 3]).as_slice(), &[-1.0, 0.0, 3.0]);
}

#[rstest]
fn reductions_ignore_sub_views(spiky: VoxelData<i32>) {
    let mut array = VoxelArray::new(&spiky);
    array.crop_x(1, 3).unwrap();
    assert_eq!(array.shape(), [2, 1, 1]);

    assert_eq!(array.max_value().unwrap(), 9);
    assert_eq!(array.min_value().unwrap(), 0);
}

#[rstest]
fn crop_does_not_translate_coordinates(spiky: VoxelData<i32>) {
    let mut array = VoxelArray::new(&spiky);
    array.crop_x(1, 3).unwrap();

    assert_eq!(array.get_value(0, 0, 0).unwrap(), 1);
    assert_eq!(array.get_value(3, 0, 0).unwrap(), 9);
}

#[rstest]
#[case(7.0, 5.0, 5.0)] // case 1
#[case(-7.0, 5.0, -10.0)] // case 2
#[case(0.0, 5.0, 0.0)] // case 3
#[case(2.5, 5.0, 5.0)] // case 4
#[case(0.26, 0.1, 0.30000000000000004)] // case 5
fn rounded_reads(#[case] value: f64, #[case] step: f64, #[case] expected: f64) {
    let data = VoxelData::new(vec![value], [1, 1, 1], [1.0; 3]).unwrap();
    let array = VoxelArray::new(&data);
    assert_eq!(array.rounded_value(0, step).unwrap(), expected);
}

#[rstest]
fn mutation_through_exclusive_view(mut spiky: VoxelData<i32>) {
    let mut array = VoxelArrayMut::new(&mut spiky);
    array.set_value(-4, 4, 0, 0).unwrap();
    array.increment_value(10, 0, 0, 0).unwrap();
    array.decrement_value(2, 3, 0, 0).unwrap();

    assert_eq!(array.min_value().unwrap(), -4);
    assert_eq!(array.max_value().unwrap(), 11);
    assert_eq!(spiky.values(), &[11, 5, 2, 7, -4]);
}

#[rstest]
#[case(3.0, 4.0)] // case 1
#[case(3.0, -400.0)] // case 2
#[case(3.0, 0.0)] // case 3
fn complex_reads_real_part(#[case] re: f64, #[case] im: f64) {
    let data = VoxelData::new(vec![Complex::new(re, im)], [1, 1, 1], [1.0; 3]).unwrap();
    let array = ComplexVoxelArray::new(&data);
    assert_eq!(array.get_value(0, 0, 0).unwrap(), 3.0);
}

#[rstest]
#[case(Order::RowMajor, &[usize::MAX, 1])] // case 1
#[case(Order::ColumnMajor, &[usize::MAX, 1])] // case 2
#[case(Order::RowMajor, &[1, usize::MAX])] // case 3
#[case(Order::ColumnMajor, &[usize::MAX])] // case 4
fn partial_index_out_of_range(#[case] order: Order, #[case] coords: &[usize]) {
    let geometry = Geometry::new([2, 3, 5], [1.0; 3]).unwrap().with_order(order);
    assert!(matches!(
        geometry.partial_index(coords),
        Err(Error::IndexOutOfRange { .. })
    ));
}

#[rstest]
#[case(&[])] // case 1
#[case(&[0, 0, 0, 99])] // case 2
fn partial_index_needs_one_to_three_coordinates(#[case] coords: &[usize]) {
    let geometry = Geometry::new([2, 3, 5], [1.0; 3]).unwrap();
    assert_eq!(
        geometry.partial_index(coords),
        Err(Error::InvalidCoordinateCount {
            found: coords.len()
        })
    );
}

#[rstest]
fn partial_read_with_huge_coordinate(ramp: VoxelData<u32>) {
    let array = VoxelArray::new(&ramp);
    assert!(array.get_value_partial(usize::MAX, 1).is_err());
}

#[rstest]
fn counters_refuse_to_wrap() {
    let mut data = VoxelData::<u8>::zeros([2, 1, 1], [1.0; 3]).unwrap();
    let mut array = VoxelArrayMut::new(&mut data);

    assert_eq!(
        array.decrement_value(1, 0, 0, 0),
        Err(Error::UnrepresentableValue(-1.0))
    );
    array.increment_value(200, 1, 0, 0).unwrap();
    assert_eq!(
        array.increment_value(100, 1, 0, 0),
        Err(Error::UnrepresentableValue(300.0))
    );
    assert_eq!(data.values(), &[0, 200]);
}
