use std::{fs::File, path::Path};

use async_trait::async_trait;

use framepress_core::{traits::FrameProcessor, types::FrameData};

/// Serializes selected per-frame stats to a CSV file, one row per frame.
/// Frames missing a selected key (dropped frames, typically) serialize an
/// empty cell for it.
pub struct CSVFrameDataSerializer {
    writer: ::csv::Writer<File>,

    values_to_log: Vec<String>,

    columns_written: bool,
}

impl CSVFrameDataSerializer {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ::csv::Error> {
        Ok(Self {
            writer: ::csv::Writer::from_path(path)?,
            values_to_log: Vec::new(),
            columns_written: false,
        })
    }

    pub fn log(mut self, value: &str) -> Self {
        self.values_to_log.push(value.to_string());
        self
    }
}

#[async_trait]
impl FrameProcessor for CSVFrameDataSerializer {
    async fn process(&mut self, frame_data: FrameData) -> Option<FrameData> {
        if !self.columns_written {
            self.writer
                .write_record(self.values_to_log.clone())
                .unwrap();
            self.columns_written = true;
        }

        let record = self.values_to_log.iter().map(|key| {
            if frame_data.has(key) {
                format!("{}", frame_data.get(key))
            } else {
                String::new()
            }
        });

        self.writer.write_record(record).unwrap();
        self.writer.flush().unwrap();

        Some(frame_data)
    }
}

#[cfg(test)]
mod tests {
    use framepress_core::{traits::FrameProcessor, types::FrameData};

    use super::CSVFrameDataSerializer;

    #[tokio::test]
    async fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");

        let mut serializer = CSVFrameDataSerializer::new(&path)
            .unwrap()
            .log("encoded_size")
            .log("chosen_quality");

        for (size, quality) in [(4200u128, 85u128), (3900, 80)] {
            let mut frame_data = FrameData::default();
            frame_data.set("encoded_size", size);
            frame_data.set("chosen_quality", quality);
            serializer.process(frame_data).await.unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();

        assert_eq!(lines.next(), Some("encoded_size,chosen_quality"));
        assert_eq!(lines.next(), Some("4200,85"));
        assert_eq!(lines.next(), Some("3900,80"));
    }
}
