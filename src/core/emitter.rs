//! Tag-driven XML emission
//!
//! Reproduces the catalog workbook's export macro. Each sheet column carries
//! a tag (row 3) and a header (row 4); the tag decides whether the column's
//! value becomes a plain attribute of the row element, a `<Property>` inside
//! a `<Properties>` block, or an attribute of a `<Layer>` inside a `<Layers>`
//! block. Output is CRLF-separated and tab-indented, and values are written
//! without XML escaping, exactly like the macro.
//!
//! Column handling, in schema order:
//!
//! | tag           | blank value            | non-blank value                          |
//! |---------------|------------------------|------------------------------------------|
//! | (none)        | skipped                | ` Header="v"` on the row element          |
//! | `Properties`  | skipped                | open `<Properties>`, write `<Property>`   |
//! | `Property`    | skipped                | open block if needed, write `<Property>`  |
//! | `/Properties` | close block if open    | open block if needed, write, close        |
//! | `Layers`      | skipped                | open `<Layers>`, start `<Layer Header="v"` |
//! | `Layer`       | skipped                | new `<Layer` after `/Layer`, else append  |
//! | `/Layer`      | ` />` if in `<Layers>` | ` Header="v" />` if in `<Layers>`          |
//! | `/Layers`     | `</Layers>` if open    | ` Header="v" />` then `</Layers>`          |

use crate::core::extract::{data_rows, load_schema};
use crate::core::format::format_cell_value;
use crate::excel::{resolve, Sheet};
use crate::types::{CellValue, ColumnSchema, ColumnTag};
use tracing::debug;

const CRLF: &str = "\r\n";

/// Sub-block currently open inside a row element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    None,
    Properties,
    Layers,
}

/// Emission state of one row, rebuilt for every row
#[derive(Debug)]
struct RowState {
    out: String,
    block: Block,
    /// The row element's start tag has been closed with `>`
    start_tag_closed: bool,
}

impl RowState {
    fn new(item_element: &str) -> Self {
        Self {
            out: format!("{CRLF}\t\t<{item_element}"),
            block: Block::None,
            start_tag_closed: false,
        }
    }

    fn close_start_tag(&mut self) {
        if !self.start_tag_closed {
            self.out.push('>');
            self.start_tag_closed = true;
        }
    }

    fn open_properties(&mut self) {
        self.close_start_tag();
        self.out.push_str(CRLF);
        self.out.push_str("\t\t\t<Properties>");
        self.block = Block::Properties;
    }

    fn close_properties(&mut self) {
        self.out.push_str(CRLF);
        self.out.push_str("\t\t\t</Properties>");
        self.block = Block::None;
    }

    fn property(&mut self, name: &str, value: &str) {
        self.out.push_str(CRLF);
        self.out
            .push_str(&format!("\t\t\t\t<Property Name=\"{name}\" Value=\"{value}\" />"));
    }

    fn open_layers(&mut self) {
        self.close_start_tag();
        self.out.push_str(CRLF);
        self.out.push_str("\t\t\t<Layers>");
        self.block = Block::Layers;
    }

    fn close_layers(&mut self) {
        self.out.push_str(CRLF);
        self.out.push_str("\t\t\t</Layers>");
        self.block = Block::None;
    }

    fn start_layer(&mut self, name: &str, value: &str) {
        self.out.push_str(CRLF);
        self.out.push_str(&format!("\t\t\t\t<Layer {name}=\"{value}\""));
    }

    fn attribute(&mut self, name: &str, value: &str) {
        self.out.push_str(&format!(" {name}=\"{value}\""));
    }

    /// `/Properties`, `/Layer` or `/Layers` column
    fn close(&mut self, tag: &ColumnTag, header: &str, value: &str) {
        match tag {
            ColumnTag::PropertiesEnd => {
                if !value.is_empty() {
                    if self.block != Block::Properties {
                        self.open_properties();
                    }
                    self.property(header, value);
                }
                if self.block == Block::Properties {
                    self.close_properties();
                }
            }
            ColumnTag::LayersEnd => {
                if self.block == Block::Layers {
                    if !value.is_empty() {
                        self.attribute(header, value);
                        self.out.push_str(" />");
                    }
                    self.close_layers();
                }
            }
            ColumnTag::LayerEnd => {
                if self.block == Block::Layers {
                    if !value.is_empty() {
                        self.attribute(header, value);
                    }
                    self.out.push_str(" />");
                }
            }
            _ => {}
        }
    }

    fn finish(mut self, item_element: &str) -> String {
        if self.start_tag_closed {
            self.out.push_str(CRLF);
            self.out.push_str(&format!("\t\t</{item_element}>"));
        } else {
            self.out.push_str(" />");
        }
        self.out
    }
}

/// Emits the XML of one sheet from its column schema
#[derive(Debug, Clone)]
pub struct TagEmitter<'a> {
    schema: &'a ColumnSchema,
    sheet_element: &'a str,
    item_element: &'a str,
}

impl<'a> TagEmitter<'a> {
    pub fn new(schema: &'a ColumnSchema, sheet_element: &'a str, item_element: &'a str) -> Self {
        Self {
            schema,
            sheet_element,
            item_element,
        }
    }

    /// Emit one row element. `values` are the resolved cells of the row in
    /// schema order; missing trailing values count as blank.
    pub fn emit_row(&self, values: &[CellValue]) -> String {
        let mut row = RowState::new(self.item_element);

        for (i, column) in self.schema.columns.iter().enumerate() {
            let value = values.get(i).map(format_cell_value).unwrap_or_default();
            let header = column.header.as_str();
            let before = row.block;

            // Closing tags act even on blank cells
            if column.tag.is_closing() {
                row.close(&column.tag, header, &value);
            } else if !value.is_empty() {
                self.open_or_continue(&mut row, i, header, &value);
            }

            if row.block != before {
                debug!(
                    item = self.item_element,
                    column = header,
                    from = ?before,
                    to = ?row.block,
                    "block changed"
                );
            }
        }

        row.finish(self.item_element)
    }

    fn open_or_continue(&self, row: &mut RowState, i: usize, header: &str, value: &str) {
        match &self.schema.columns[i].tag {
            ColumnTag::Attribute => row.attribute(header, value),
            ColumnTag::Properties => {
                row.open_properties();
                row.property(header, value);
            }
            ColumnTag::Property => {
                if row.block != Block::Properties {
                    row.open_properties();
                }
                row.property(header, value);
            }
            ColumnTag::Layers => {
                row.open_layers();
                row.start_layer(header, value);
            }
            ColumnTag::Layer => {
                // A Layer column right after a /Layer column starts a new layer
                if self.schema.previous_tag(i) == Some(&ColumnTag::LayerEnd) {
                    debug!(item = self.item_element, column = header, "new layer");
                    row.start_layer(header, value);
                } else {
                    row.attribute(header, value);
                }
            }
            ColumnTag::PropertiesEnd
            | ColumnTag::LayerEnd
            | ColumnTag::LayersEnd
            | ColumnTag::Other(_) => {}
        }
    }

    /// Wrap pre-emitted rows in `<SheetElement>` … `</SheetElement>`.
    pub fn emit_sheet<I>(&self, rows: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<[CellValue]>,
    {
        let mut out = format!("{CRLF}\t<{}>", self.sheet_element);
        for values in rows {
            out.push_str(&self.emit_row(values.as_ref()));
        }
        out.push_str(&format!("{CRLF}\t</{}>", self.sheet_element));
        out
    }
}

/// Free-standing form of [`TagEmitter::emit_sheet`].
pub fn emit_sheet<I>(
    schema: &ColumnSchema,
    rows: I,
    sheet_element: &str,
    item_element: &str,
) -> String
where
    I: IntoIterator,
    I::Item: AsRef<[CellValue]>,
{
    TagEmitter::new(schema, sheet_element, item_element).emit_sheet(rows)
}

/// Row element name for a sheet: `Materials` → `Material`,
/// `EdgeBands` → `EdgeBand`, otherwise trailing `s` stripped.
pub fn item_element_name(sheet_name: &str) -> String {
    match sheet_name {
        "Materials" => "Material".to_string(),
        "EdgeBands" => "EdgeBand".to_string(),
        other => other.trim_end_matches('s').to_string(),
    }
}

/// XML block of one workbook sheet and the number of row elements in it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetXml {
    /// `\r\n\t<Sheet>` … `\r\n\t</Sheet>`
    pub body: String,
    pub count: usize,
}

/// Emit a whole workbook sheet: schema from rows 3-4, one element per data row.
pub fn render_sheet(sheet: &Sheet) -> SheetXml {
    let schema = load_schema(sheet);
    let item_element = item_element_name(sheet.name());
    let emitter = TagEmitter::new(&schema, sheet.name(), &item_element);

    let rows: Vec<Vec<CellValue>> = data_rows(sheet)
        .map(|row| {
            (1..=schema.len() as u32)
                .map(|col| resolve(sheet, row, col).clone())
                .collect()
        })
        .collect();

    SheetXml {
        count: rows.len(),
        body: emitter.emit_sheet(&rows),
    }
}
