use ndarray::{array, Array1, Array2, Array3, ArrayD};
use ndtext::{read_text, IngestOptions, NumericType, ReadTextError, ReadTextExt};
use std::io::Write as _;
use tempfile::NamedTempFile;

fn text_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn read_vector() {
    let arr = Array1::<u8>::read_text("resources/vector.txt", ",").unwrap();
    assert_eq!(arr, array![3, 1, 4, 1, 5]);
}

#[test]
fn read_matrix() {
    let file = text_file("1,2|3,4|5,6\n");
    let arr = Array2::<i32>::read_text(file.path(), ",|").unwrap();
    assert_eq!(arr, array![[1, 2], [3, 4], [5, 6]]);
}

#[test]
fn read_cube() {
    let arr = Array3::<f32>::read_text("resources/cube.txt", ",|\n").unwrap();
    assert_eq!(arr.shape(), [2, 2, 3]);
    assert_eq!(arr[[1, 0, 2]], 9.5);
    assert_eq!(arr[[0, 1, 0]], 4.5);
}

#[test]
fn dynamic_dimension() {
    let file = text_file("1,2|3,4^5,6|7,8");
    let arr = ArrayD::<i64>::read_text(file.path(), ",|^").unwrap();
    assert_eq!(arr.ndim(), 3);
    assert_eq!(arr.into_raw_vec_and_offset().0, [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn wrong_ndim() {
    let err = Array2::<u8>::read_text("resources/vector.txt", ",|").unwrap_err();
    assert!(matches!(err, ReadTextError::WrongNdim(Some(2), 1)), "{err}");
}

#[test]
fn options_pass_through() {
    let file = text_file("010,7");
    let arr = Array1::<u16>::read_text(file.path(), ",").unwrap();
    assert_eq!(arr, array![8, 7]);
    let options = IngestOptions::default().radix(ndtext::IntegerRadix::Decimal);
    let arr = Array1::<u16>::read_text_with(file.path(), ",", &options).unwrap();
    assert_eq!(arr, array![10, 7]);
}

#[test]
fn runtime_type_into_ndarray() {
    let arr = read_text("resources/matrix.txt", ",\n", NumericType::I8).unwrap();
    let ndtext::AnyArray::I8(arr) = arr else {
        panic!("expected int8 array");
    };
    let nd = arr.into_ndarray();
    assert_eq!(nd, array![[1i8, 2, 3], [4, 5, 6]].into_dyn());
}
