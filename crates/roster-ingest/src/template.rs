use std::path::Path;

use roster_model::Result;

/// Fixed example document offered to administrators before they upload.
///
/// The header line matches the target schema keys and the three sample rows
/// cover an admin, a teacher with a grade, and a parent. The same text
/// doubles as a round-trip fixture: parse, auto-map, validate and transform
/// must all succeed on it unchanged.
pub const TEMPLATE_CSV: &str = "\
name,email,role,phone,isActive,grade
Ana García,ana.garcia@school.edu,admin,600111222,true,
Juan Pérez,juan.perez@school.edu,teacher,600333444,true,5A
María López,maria.lopez@school.edu,parent,600555666,false,
";

/// Write the template to `path`.
pub fn write_template(path: &Path) -> Result<()> {
    std::fs::write(path, TEMPLATE_CSV)?;
    Ok(())
}
