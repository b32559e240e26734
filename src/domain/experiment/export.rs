//! Export an experiment's record to a file on disk.

use crate::domain::experiment::client::Experiments;
use crate::error::{HttpError, SdkError, ValidationError};
use crate::http::Method;

use reqwest::header::HeaderMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Target formats accepted by the export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Eln,
    Json,
    QrPdf,
    QrPng,
    Pdf,
    PdfA,
    Zip,
    ZipA,
}

impl ExportFormat {
    /// Wire value for the `format` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Eln => "eln",
            ExportFormat::Json => "json",
            ExportFormat::QrPdf => "qrpdf",
            ExportFormat::QrPng => "qrpng",
            ExportFormat::Pdf => "pdf",
            ExportFormat::PdfA => "pdfa",
            ExportFormat::Zip => "zip",
            ExportFormat::ZipA => "zipa",
        }
    }

    /// On-disk suffix. The compound formats map to their real
    /// extensions: `qrpdf` to `qr.pdf`, `qrpng` to `qr.png`, and the
    /// archival variants `pdfa`/`zipa` to plain `pdf`/`zip`.
    pub fn suffix(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Eln => "eln",
            ExportFormat::Json => "json",
            ExportFormat::QrPdf => "qr.pdf",
            ExportFormat::QrPng => "qr.png",
            ExportFormat::Pdf | ExportFormat::PdfA => "pdf",
            ExportFormat::Zip | ExportFormat::ZipA => "zip",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "eln" => Ok(ExportFormat::Eln),
            "json" => Ok(ExportFormat::Json),
            "qrpdf" => Ok(ExportFormat::QrPdf),
            "qrpng" => Ok(ExportFormat::QrPng),
            "pdf" => Ok(ExportFormat::Pdf),
            "pdfa" => Ok(ExportFormat::PdfA),
            "zip" => Ok(ExportFormat::Zip),
            "zipa" => Ok(ExportFormat::ZipA),
            _ => Err(ValidationError::InvalidExportFormat(s.to_string())),
        }
    }
}

impl<'a> Experiments<'a> {
    /// Export an experiment and write it to disk, returning the path.
    ///
    /// With no `output` path the filename is derived from the
    /// experiment's title and id in the current directory. An existing
    /// file is refused unless `overwrite` is set — checked before
    /// anything touches the disk.
    pub fn export(
        &self,
        experiment_id: i64,
        format: ExportFormat,
        output: Option<&Path>,
        overwrite: bool,
    ) -> Result<PathBuf, SdkError> {
        let path = match output {
            Some(path) => path.to_path_buf(),
            None => {
                let exp = self.get(experiment_id)?;
                derived_filename(
                    exp.title().unwrap_or("experiment"),
                    exp.id().unwrap_or(experiment_id),
                    format,
                )
            }
        };

        if path.exists() && !overwrite {
            return Err(ValidationError::OutputExists(path).into());
        }

        // The JSON rendition is the record itself; no second fetch.
        if format == ExportFormat::Json {
            let exp = self.get(experiment_id)?;
            tracing::info!(path = %path.display(), "writing experiment as JSON");
            fs::write(&path, serde_json::to_vec_pretty(exp.fields())?)?;
            return Ok(path);
        }

        tracing::info!(format = %format, "fetching experiment export");
        let mut resp = self.client.http.send(
            Method::GET,
            &format!("experiments/{experiment_id}"),
            &[("format".to_string(), format.as_str().to_string())],
            HeaderMap::new(),
            None,
        )?;

        let mut file = fs::File::create(&path)?;
        resp.copy_to(&mut file).map_err(HttpError::from)?;
        tracing::info!(path = %path.display(), "wrote export");
        Ok(path)
    }
}

/// Filename for an auto-named export: sanitized title, the id in square
/// brackets, and the format's on-disk suffix.
fn derived_filename(title: &str, id: i64, format: ExportFormat) -> PathBuf {
    let stem = sanitize_filename(&format!("{title} [{id}]"));
    PathBuf::from(format!("{stem}.{}", format.suffix()))
}

/// Strip characters that are reserved in filenames on the major
/// platforms, along with control characters.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| {
            !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') && !c.is_control()
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trips_from_str() {
        for name in ["csv", "eln", "json", "qrpdf", "qrpng", "pdf", "pdfa", "zip", "zipa"] {
            let format: ExportFormat = name.parse().unwrap();
            assert_eq!(format.as_str(), name);
        }
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    }

    #[test]
    fn test_unknown_format_is_a_validation_error() {
        let err = "docx".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidExportFormat(ref s) if s == "docx"));
    }

    #[test]
    fn test_suffix_corrections() {
        assert_eq!(ExportFormat::QrPdf.suffix(), "qr.pdf");
        assert_eq!(ExportFormat::QrPng.suffix(), "qr.png");
        assert_eq!(ExportFormat::PdfA.suffix(), "pdf");
        assert_eq!(ExportFormat::ZipA.suffix(), "zip");
        assert_eq!(ExportFormat::Csv.suffix(), "csv");
    }

    #[test]
    fn test_derived_filename_appends_id_and_suffix() {
        let path = derived_filename("My Exp", 7, ExportFormat::QrPdf);
        assert_eq!(path, PathBuf::from("My Exp [7].qr.pdf"));
    }

    #[test]
    fn test_derived_filename_sanitizes_the_title() {
        let path = derived_filename("acid/base: trial?", 3, ExportFormat::Pdf);
        assert_eq!(path, PathBuf::from("acidbase trial [3].pdf"));
    }
}
