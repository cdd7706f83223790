use crate::aggregate::ResultSet;

/// Render the result set as a CSV document: configured field names plus
/// `count` as the header, one row per record in result-set order.
pub fn render_csv(result: &ResultSet) -> String {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    let header: Vec<&str> = result
        .fields
        .iter()
        .map(|f| f.path.as_str())
        .chain(std::iter::once("count"))
        .collect();
    write_record(&mut writer, header);

    for record in result.records() {
        let row: Vec<String> = record
            .cells
            .iter()
            .map(|cell| cell.display())
            .chain(std::iter::once(record.count.to_string()))
            .collect();
        write_record(&mut writer, row);
    }

    let bytes = writer
        .into_inner()
        .expect("flushing an in-memory csv writer cannot fail");
    String::from_utf8(bytes).expect("csv output is valid utf-8")
}

fn write_record<I, T>(writer: &mut ::csv::Writer<Vec<u8>>, record: I)
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    writer
        .write_record(record)
        .expect("writing to an in-memory csv writer cannot fail");
}
