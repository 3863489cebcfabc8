use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter, Stdout};
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use crate::consts::{MULTI_SCORE_DELIM, STDIO_PATH};
use crate::errors::{RegionSetError, RegionSetResult};
use crate::models::Region;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> RegionSetResult<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)
        .map_err(|e| RegionSetError::FileReadError(format!("{}: {}", path.display(), e)))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> RegionSetResult<BufReader<Box<dyn Read>>> {
    if file_path_str == STDIO_PATH {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

///
/// Output sink returned by [get_dynamic_writer].
///
/// Call [DynamicWriter::finish] once everything is written: for gzip output
/// it writes the trailer and surfaces any error doing so.
///
pub enum DynamicWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Stdout(BufWriter<Stdout>),
}

impl DynamicWriter {
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            DynamicWriter::Plain(mut w) => w.flush(),
            DynamicWriter::Gzip(encoder) => encoder.finish()?.flush(),
            DynamicWriter::Stdout(mut w) => w.flush(),
        }
    }
}

impl Write for DynamicWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            DynamicWriter::Plain(w) => w.write(buf),
            DynamicWriter::Gzip(w) => w.write(buf),
            DynamicWriter::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            DynamicWriter::Plain(w) => w.flush(),
            DynamicWriter::Gzip(w) => w.flush(),
            DynamicWriter::Stdout(w) => w.flush(),
        }
    }
}

///
/// Get a buffered writer for a file (gzip'd when the name ends in `.gz`)
/// or for stdout when no path is given.
///
pub fn get_dynamic_writer(path: Option<&Path>) -> RegionSetResult<DynamicWriter> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = BufWriter::new(File::create(path)?);
            if path.extension() == Some(OsStr::new("gz")) {
                Ok(DynamicWriter::Gzip(GzEncoder::new(file, Compression::default())))
            } else {
                Ok(DynamicWriter::Plain(file))
            }
        }
        None => Ok(DynamicWriter::Stdout(BufWriter::new(std::io::stdout()))),
    }
}

///
/// Parse a record whose fourth column holds several scores separated by
/// `;` and keep only the largest one.
///
pub fn parse_multi_score_line(record: &str, line: usize) -> RegionSetResult<Region> {
    let mut fields = record.splitn(5, '\t');
    let head: Vec<&str> = fields.by_ref().take(3).collect();
    let scores_str = fields.next().ok_or_else(|| RegionSetError::RegionParseError {
        line,
        message: "missing score field".to_string(),
    })?;

    let mut max_score: Option<f64> = None;
    for score_str in scores_str.split(MULTI_SCORE_DELIM) {
        let score = score_str
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .ok_or_else(|| RegionSetError::RegionParseError {
                line,
                message: format!("score is not a finite number: {:?}", score_str),
            })?;
        max_score = Some(max_score.map_or(score, |m: f64| m.max(score)));
    }

    let max_score = max_score.ok_or_else(|| RegionSetError::RegionParseError {
        line,
        message: "empty score list".to_string(),
    })?;

    let collapsed = format!("{}\t{}", head.join("\t"), max_score);
    Region::from_bed_line(&collapsed, line)
}

pub fn is_header_line(line: &str) -> bool {
    line.starts_with("browser") || line.starts_with("track") || line.starts_with('#')
}
