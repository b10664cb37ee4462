//! Native GeoTIFF support built on the `tiff` crate.
//!
//! Only the georeferencing tags needed to place a band on the map are
//! interpreted: ModelPixelScale + ModelTiepoint (or ModelTransformation)
//! and the CRS keys of the GeoKeyDirectory.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use scene_common::{BoundingBox, CrsCode, GeoTransform, Raster};
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;
use tiff::ColorType;
use tracing::debug;

use crate::error::{RasterError, RasterResult};
use crate::window::PixelWindow;
use crate::{BandReader, RasterMetadata};

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const MODEL_TRANSFORMATION: u16 = 34264;
const GEO_KEY_DIRECTORY: u16 = 34735;

const KEY_MODEL_TYPE: u16 = 1024;
const KEY_RASTER_TYPE: u16 = 1025;
const KEY_GEOGRAPHIC_TYPE: u16 = 2048;
const KEY_PROJECTED_CS_TYPE: u16 = 3072;

const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;
const RASTER_PIXEL_IS_POINT: u16 = 2;
const USER_DEFINED: u16 = 32767;

fn tag(code: u16) -> Tag {
    Tag::from_u16_exhaustive(code)
}

/// Reads single-band GeoTIFF rasters.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoTiffReader;

impl GeoTiffReader {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> RasterResult<Decoder<BufReader<File>>> {
        let file = File::open(path).map_err(|e| RasterError::open(path, e))?;
        Ok(Decoder::new(BufReader::new(file))?.with_limits(Limits::unlimited()))
    }

    fn read_metadata(
        decoder: &mut Decoder<BufReader<File>>,
        path: &Path,
    ) -> RasterResult<RasterMetadata> {
        match decoder.colortype()? {
            ColorType::Gray(_) => {}
            other => {
                return Err(RasterError::UnsupportedLayout(format!(
                    "{}: expected a single-band image, found {:?}",
                    path.display(),
                    other
                )))
            }
        }

        let (width, height) = decoder.dimensions()?;
        let keys = match decoder.find_tag(tag(GEO_KEY_DIRECTORY))? {
            Some(value) => GeoKeys::parse(&value.into_u16_vec()?)?,
            None => return Err(RasterError::missing_tag(path, "GeoKeyDirectory")),
        };

        let mut transform = match decoder.find_tag(tag(MODEL_TRANSFORMATION))? {
            Some(value) => transform_from_matrix(&value.into_f64_vec()?)?,
            None => {
                let scale = decoder
                    .find_tag(tag(MODEL_PIXEL_SCALE))?
                    .ok_or_else(|| RasterError::missing_tag(path, "ModelPixelScale"))?
                    .into_f64_vec()?;
                let tiepoint = decoder
                    .find_tag(tag(MODEL_TIEPOINT))?
                    .ok_or_else(|| RasterError::missing_tag(path, "ModelTiepoint"))?
                    .into_f64_vec()?;
                transform_from_tiepoint(&scale, &tiepoint)?
            }
        };

        // Align point-sampled rasters to the area convention used everywhere else.
        if keys.raster_type == Some(RASTER_PIXEL_IS_POINT) {
            transform.origin_x -= 0.5 * (transform.pixel_width + transform.row_rotation);
            transform.origin_y -= 0.5 * (transform.col_rotation + transform.pixel_height);
        }

        let metadata = RasterMetadata {
            crs: keys.crs()?,
            transform,
            width: width as usize,
            height: height as usize,
        };
        debug!(
            path = %path.display(),
            crs = %metadata.crs,
            width = metadata.width,
            height = metadata.height,
            "Read GeoTIFF metadata"
        );
        Ok(metadata)
    }
}

impl BandReader for GeoTiffReader {
    fn metadata(&self, path: &Path) -> RasterResult<RasterMetadata> {
        let mut decoder = Self::open(path)?;
        Self::read_metadata(&mut decoder, path)
    }

    fn read_window(&self, path: &Path, bounds: &BoundingBox) -> RasterResult<Raster> {
        let mut decoder = Self::open(path)?;
        let metadata = Self::read_metadata(&mut decoder, path)?;
        let window = metadata.window(bounds)?;

        let data = read_window_chunks(&mut decoder, &window, path)?;

        debug!(
            path = %path.display(),
            col_off = window.col_off,
            row_off = window.row_off,
            width = window.width,
            height = window.height,
            "Read GeoTIFF window"
        );
        Ok(Raster::new(data, window.width, window.height))
    }
}

/// Decode only the strips or tiles overlapping `window` and copy its pixels
/// out, row-major.
fn read_window_chunks(
    decoder: &mut Decoder<BufReader<File>>,
    window: &PixelWindow,
    path: &Path,
) -> RasterResult<Vec<f32>> {
    let (chunk_w, chunk_h) = decoder.chunk_dimensions();
    let (chunk_w, chunk_h) = (chunk_w as usize, chunk_h as usize);
    if chunk_w == 0 || chunk_h == 0 {
        return Err(RasterError::UnsupportedLayout(format!(
            "{}: zero-sized strips or tiles",
            path.display()
        )));
    }
    let (image_w, _) = decoder.dimensions()?;
    let chunks_across = (image_w as usize + chunk_w - 1) / chunk_w;

    let col_end = window.col_off + window.width;
    let row_end = window.row_off + window.height;
    let mut out = vec![f32::NAN; window.width * window.height];

    for chunk_row in window.row_off / chunk_h..=(row_end - 1) / chunk_h {
        for chunk_col in window.col_off / chunk_w..=(col_end - 1) / chunk_w {
            let index = u32::try_from(chunk_row * chunks_across + chunk_col).map_err(|_| {
                RasterError::UnsupportedLayout(format!("{}: too many chunks", path.display()))
            })?;
            let (data_w, data_h) = decoder.chunk_data_dimensions(index);
            let (data_w, data_h) = (data_w as usize, data_h as usize);
            let samples = decoding_to_f32(decoder.read_chunk(index)?);
            if samples.len() < data_w * data_h {
                return Err(RasterError::UnsupportedLayout(format!(
                    "{}: chunk {} decoded {} samples for {}x{}",
                    path.display(),
                    index,
                    samples.len(),
                    data_w,
                    data_h
                )));
            }

            // Overlap of this chunk with the window, in image pixels
            let (x0, y0) = (chunk_col * chunk_w, chunk_row * chunk_h);
            let cols = window.col_off.max(x0)..col_end.min(x0 + data_w);
            let rows = window.row_off.max(y0)..row_end.min(y0 + data_h);
            if cols.is_empty() {
                continue;
            }
            for row in rows {
                let src = (row - y0) * data_w + (cols.start - x0);
                let dst = (row - window.row_off) * window.width + (cols.start - window.col_off);
                out[dst..dst + cols.len()].copy_from_slice(&samples[src..src + cols.len()]);
            }
        }
    }
    Ok(out)
}

/// CRS-related keys from a GeoKeyDirectory.
#[derive(Debug, Default)]
struct GeoKeys {
    model_type: Option<u16>,
    raster_type: Option<u16>,
    geographic: Option<u16>,
    projected: Option<u16>,
}

impl GeoKeys {
    fn parse(directory: &[u16]) -> RasterResult<Self> {
        if directory.len() < 4 {
            return Err(RasterError::invalid_metadata("truncated GeoKeyDirectory header"));
        }
        let count = directory[3] as usize;
        let entries = &directory[4..];
        if entries.len() < count * 4 {
            return Err(RasterError::invalid_metadata(format!(
                "GeoKeyDirectory declares {} keys but holds {}",
                count,
                entries.len() / 4
            )));
        }

        let mut keys = GeoKeys::default();
        for entry in entries.chunks_exact(4).take(count) {
            // Only inline SHORT values (location 0) carry the keys we need.
            if entry[1] != 0 {
                continue;
            }
            let value = Some(entry[3]);
            match entry[0] {
                KEY_MODEL_TYPE => keys.model_type = value,
                KEY_RASTER_TYPE => keys.raster_type = value,
                KEY_GEOGRAPHIC_TYPE => keys.geographic = value,
                KEY_PROJECTED_CS_TYPE => keys.projected = value,
                _ => {}
            }
        }
        Ok(keys)
    }

    fn crs(&self) -> RasterResult<CrsCode> {
        let code = match self.model_type {
            Some(MODEL_TYPE_PROJECTED) => self.projected,
            Some(MODEL_TYPE_GEOGRAPHIC) => self.geographic,
            _ => self.projected.or(self.geographic),
        };
        match code {
            Some(USER_DEFINED) | None => Err(RasterError::invalid_metadata(
                "GeoTIFF has no EPSG-coded coordinate system",
            )),
            Some(epsg) => Ok(CrsCode::from_epsg(epsg as u32)?),
        }
    }
}

fn transform_from_tiepoint(scale: &[f64], tiepoint: &[f64]) -> RasterResult<GeoTransform> {
    if scale.len() < 2 || tiepoint.len() < 6 {
        return Err(RasterError::invalid_metadata(format!(
            "malformed ModelPixelScale ({} values) or ModelTiepoint ({} values)",
            scale.len(),
            tiepoint.len()
        )));
    }
    let (sx, sy) = (scale[0], scale[1]);
    if sx <= 0.0 || sy <= 0.0 {
        return Err(RasterError::invalid_metadata(format!(
            "non-positive pixel scale ({}, {})",
            sx, sy
        )));
    }
    let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);
    Ok(GeoTransform::north_up(x - i * sx, y + j * sy, sx, sy))
}

fn transform_from_matrix(m: &[f64]) -> RasterResult<GeoTransform> {
    if m.len() < 16 {
        return Err(RasterError::invalid_metadata(format!(
            "ModelTransformation has {} values, expected 16",
            m.len()
        )));
    }
    Ok(GeoTransform::from_gdal([m[3], m[0], m[1], m[7], m[4], m[5]]))
}

fn decoding_to_f32(result: DecodingResult) -> Vec<f32> {
    match result {
        DecodingResult::U8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::F32(v) => v,
        DecodingResult::F64(v) => v.into_iter().map(|x| x as f32).collect(),
    }
}

/// Write a single-band 16-bit GeoTIFF with north-up georeferencing.
pub fn write_geotiff_u16(
    path: &Path,
    data: &[u16],
    width: usize,
    height: usize,
    crs: CrsCode,
    transform: &GeoTransform,
) -> RasterResult<()> {
    write_u16_strips(path, data, width, height, crs, transform, None)
}

/// [`write_geotiff_u16`] with an explicit strip height.
fn write_u16_strips(
    path: &Path,
    data: &[u16],
    width: usize,
    height: usize,
    crs: CrsCode,
    transform: &GeoTransform,
    rows_per_strip: Option<u32>,
) -> RasterResult<()> {
    if data.len() != width * height {
        return Err(RasterError::invalid_metadata(format!(
            "{} samples for a {}x{} image",
            data.len(),
            width,
            height
        )));
    }
    if transform.row_rotation != 0.0 || transform.col_rotation != 0.0 {
        return Err(RasterError::invalid_metadata(
            "only north-up transforms can be written",
        ));
    }
    let epsg = u16::try_from(crs.epsg())
        .map_err(|_| RasterError::invalid_metadata(format!("{} does not fit a GeoKey", crs)))?;
    let (model_type, crs_key) = if crs.is_geographic() {
        (MODEL_TYPE_GEOGRAPHIC, KEY_GEOGRAPHIC_TYPE)
    } else {
        (MODEL_TYPE_PROJECTED, KEY_PROJECTED_CS_TYPE)
    };

    let file = File::create(path).map_err(|e| RasterError::Create {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
    let mut image = encoder.new_image::<colortype::Gray16>(width as u32, height as u32)?;
    if let Some(rows) = rows_per_strip {
        image.rows_per_strip(rows)?;
    }

    let scale = [transform.pixel_width, -transform.pixel_height, 0.0];
    let tiepoint = [0.0, 0.0, 0.0, transform.origin_x, transform.origin_y, 0.0];
    #[rustfmt::skip]
    let geo_keys: [u16; 16] = [
        1, 1, 0, 3,
        KEY_MODEL_TYPE, 0, 1, model_type,
        KEY_RASTER_TYPE, 0, 1, RASTER_PIXEL_IS_AREA,
        crs_key, 0, 1, epsg,
    ];
    image.encoder().write_tag(tag(MODEL_PIXEL_SCALE), &scale[..])?;
    image.encoder().write_tag(tag(MODEL_TIEPOINT), &tiepoint[..])?;
    image.encoder().write_tag(tag(GEO_KEY_DIRECTORY), &geo_keys[..])?;
    image.write_data(data)?;

    debug!(path = %path.display(), width, height, crs = %crs, "Wrote GeoTIFF");
    Ok(())
}
