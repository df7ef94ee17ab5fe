//! CSV export of per-epoch performance curves

use std::{fs::File, io::Write, path::Path};

use crate::{
    Error, Result,
    analysis::{mean_curve, std_dev_curve},
};

/// Writes `epoch, mean, std_dev, run_0, ..., run_{n-1}` rows
pub struct CurvesCsvExporter;

impl CurvesCsvExporter {
    /// Write the curves to any writer
    pub fn write<W: Write>(writer: W, curves: &[Vec<f64>]) -> Result<()> {
        let mean = mean_curve(curves)?;
        let std_dev = std_dev_curve(curves)?;

        let mut csv = csv::Writer::from_writer(writer);
        let mut header = vec!["epoch".to_string(), "mean".to_string(), "std_dev".to_string()];
        header.extend((0..curves.len()).map(|run| format!("run_{run}")));
        csv.write_record(&header)?;

        for epoch in 0..mean.len() {
            let mut record = vec![
                epoch.to_string(),
                mean[epoch].to_string(),
                std_dev[epoch].to_string(),
            ];
            record.extend(curves.iter().map(|curve| curve[epoch].to_string()));
            csv.write_record(&record)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the curves to a file
    pub fn export<P: AsRef<Path>>(path: P, curves: &[Vec<f64>]) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create CSV file {path:?}"),
            source,
        })?;
        Self::write(file, curves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_layout() {
        let mut buffer = Vec::new();
        CurvesCsvExporter::write(&mut buffer, &[vec![1.0, 2.0], vec![3.0, 2.0]]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "epoch,mean,std_dev,run_0,run_1");
        assert_eq!(lines.len(), 3);

        let first: Vec<f64> = lines[1].split(',').map(|f| f.parse().unwrap()).collect();
        assert_eq!(first[0], 0.0);
        assert_eq!(first[1], 2.0);
        assert!((first[2] - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(&first[3..], &[1.0, 3.0]);
        assert_eq!(lines[2], "1,2,0,2,2");
    }

    #[test]
    fn test_empty_curves_rejected() {
        assert!(CurvesCsvExporter::write(Vec::new(), &[]).is_err());
    }
}
