//! Test utilities for pqcol-core

#[cfg(test)]
pub mod test {
    use crate::ColumnWriterBuilder;
    use arrow::record_batch::RecordBatch;
    use arrow_array::{ArrayRef, Float64Array, Int32Array, Int64Array, StringArray};
    use arrow_schema::{DataType, Field, Schema};
    use bytes::Bytes;
    use parquet::arrow::ArrowWriter;
    use std::sync::Arc;

    /// A single Int64 column written through the crate's own writer
    pub fn int64_column_bytes(name: &str, values: &[i64], row_group_size: usize) -> Bytes {
        let writer = ColumnWriterBuilder::new()
            .with_row_group_size(row_group_size)
            .build(name)
            .unwrap();
        let mut buffer = Vec::new();
        writer.write_to(&mut buffer, values).unwrap();
        Bytes::from(buffer)
    }

    /// Columns `id` (Int64), `small` (Int32), `price` (Float64), `label` (Utf8)
    pub fn mixed_types_bytes() -> Bytes {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("small", DataType::Int32, false),
            Field::new("price", DataType::Float64, false),
            Field::new("label", DataType::Utf8, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![1, 2, 3])),
            Arc::new(Int32Array::from(vec![i32::MIN, 0, i32::MAX])),
            Arc::new(Float64Array::from(vec![1.5, 2.5, 3.5])),
            Arc::new(StringArray::from(vec!["a", "b", "c"])),
        ];
        batch_bytes(RecordBatch::try_new(schema, columns).unwrap())
    }

    /// A nullable Int64 column `maybe` holding `[1, null, 3]`
    pub fn nullable_bytes() -> Bytes {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "maybe",
            DataType::Int64,
            true,
        )]));
        let columns: Vec<ArrayRef> = vec![Arc::new(Int64Array::from(vec![Some(1), None, Some(3)]))];
        batch_bytes(RecordBatch::try_new(schema, columns).unwrap())
    }

    fn batch_bytes(batch: RecordBatch) -> Bytes {
        let mut buffer = Vec::new();
        {
            let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), None).unwrap();
            writer.write(&batch).unwrap();
            writer.close().unwrap();
        }
        Bytes::from(buffer)
    }
}
