//! `.npy` array loading, shape validation and stacking.
//!
//! Inputs may hold complex or real samples of any common numeric dtype; they
//! are all promoted to `Complex64` on load so the histogram stage only deals
//! with one element type.
use crate::error::{HistogramError, Result};
use crate::io::ensure_parent_dir;
use log::debug;
use ndarray::{Array, ArrayD, ArrayViewD, Axis, Dimension};
use ndarray_npy::{ReadNpyError, ReadNpyExt, ReadableElement, WriteNpyError, WriteNpyExt};
use num_complex::{Complex32, Complex64};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, Write};
use std::path::{Path, PathBuf};

/// Decode the `.npy` behind `reader` as element type `T`, from the start.
///
/// `Ok(None)` means the file is valid `.npy` but holds a different dtype.
fn read_as<T, R>(reader: &mut R, path: &Path) -> Result<Option<ArrayD<T>>>
where
    T: ReadableElement,
    R: Read + Seek,
{
    reader.rewind().map_err(|e| HistogramError::io(path, e))?;
    match ArrayD::<T>::read_npy(&mut *reader) {
        Ok(arr) => Ok(Some(arr)),
        Err(ReadNpyError::WrongDescriptor(_)) => Ok(None),
        Err(ReadNpyError::Io(e)) if e.kind() != ErrorKind::UnexpectedEof => {
            Err(HistogramError::io(path, e))
        }
        Err(e) => Err(HistogramError::UnexpectedInputType {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

macro_rules! read_real {
    ($reader:expr, $path:expr, $($ty:ty),+ $(,)?) => {
        $(
            if let Some(arr) = read_as::<$ty, _>($reader, $path)? {
                return Ok(arr.mapv(|v| Complex64::new(v as f64, 0.0)));
            }
        )+
    };
}

/// Load one `.npy` file as a complex array.
///
/// Each element type is tried from the start of the stream; a mismatch only
/// costs a header read. complex128 data is returned without conversion.
pub fn load_array(path: &Path) -> Result<ArrayD<Complex64>> {
    let file = File::open(path).map_err(|e| HistogramError::io(path, e))?;
    let mut reader = BufReader::new(file);
    if let Some(arr) = read_as::<Complex64, _>(&mut reader, path)? {
        debug!("load_array {} shape={:?}", path.display(), arr.shape());
        return Ok(arr);
    }
    if let Some(arr) = read_as::<Complex32, _>(&mut reader, path)? {
        return Ok(arr.mapv(|z| Complex64::new(f64::from(z.re), f64::from(z.im))));
    }
    read_real!(&mut reader, path, f64, f32, i64, i32, i16, i8, u64, u32, u16, u8);
    Err(HistogramError::UnexpectedInputType {
        path: path.to_path_buf(),
        reason: "unsupported element type".to_string(),
    })
}

/// Check that every array has the shape of the first one and at least one axis.
pub fn check_shapes(inputs: &[(PathBuf, ArrayD<Complex64>)]) -> Result<()> {
    let Some((first_path, first)) = inputs.first() else {
        return Ok(());
    };
    if first.ndim() == 0 {
        return Err(HistogramError::UnexpectedInputType {
            path: first_path.clone(),
            reason: "zero-dimensional array has no trailing axis".to_string(),
        });
    }
    let expected = first.shape();
    for (path, arr) in &inputs[1..] {
        if arr.shape() != expected {
            return Err(HistogramError::ShapeMismatch {
                path: path.clone(),
                expected: expected.to_vec(),
                found: arr.shape().to_vec(),
            });
        }
    }
    Ok(())
}

/// Stack a non-empty set of arrays along a new leading axis.
pub fn stack_arrays(inputs: &[(PathBuf, ArrayD<Complex64>)]) -> Result<ArrayD<Complex64>> {
    check_shapes(inputs)?;
    let views: Vec<ArrayViewD<'_, Complex64>> = inputs.iter().map(|(_, a)| a.view()).collect();
    ndarray::stack(Axis(0), &views).map_err(|e| HistogramError::UnexpectedInputType {
        path: inputs.first().map(|(p, _)| p.clone()).unwrap_or_default(),
        reason: format!("cannot stack arrays: {e}"),
    })
}

/// Load every file and stack them as `[files, ...shape]`.
pub fn load_stack(files: &[PathBuf]) -> Result<ArrayD<Complex64>> {
    let inputs = files
        .iter()
        .map(|path| Ok((path.clone(), load_array(path)?)))
        .collect::<Result<Vec<_>>>()?;
    stack_arrays(&inputs)
}

/// Write `array` as a C-order float64 `.npy`, creating parent directories.
pub fn save_array<D: Dimension>(path: &Path, array: &Array<f64, D>) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| HistogramError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    array.write_npy(&mut writer).map_err(|e| match e {
        WriteNpyError::Io(source) => HistogramError::io(path, source),
        other => HistogramError::Encode {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })?;
    writer.flush().map_err(|e| HistogramError::io(path, e))
}
