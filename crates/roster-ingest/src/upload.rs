/// Name-based check for the upload boundary: the file name must end in
/// `.csv`, ASCII case-insensitive.
///
/// A convenience filter, not a content sniff and not a security boundary;
/// the parser itself decides whether the contents are usable.
pub fn is_supported_upload(file_name: &str) -> bool {
    file_name.trim().to_ascii_lowercase().ends_with(".csv")
}
