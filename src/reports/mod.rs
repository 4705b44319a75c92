use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use nameforge::api::ChartReport;
use nameforge::ganzhi::Nayin;
use nameforge::lexicon::{FiveElement, FolkwayEntry};
use nameforge::name::{NameRecord, NameSpec};
use nameforge::numerology::{Fortune, GridReport, RankBuckets, StrokePair};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn elements(spec: &NameSpec) -> String {
    spec.five_elements.iter().map(FiveElement::glyph).collect()
}

fn fortune_cell(f: Fortune) -> Cell {
    let cell = Cell::new(f.label());
    match f {
        Fortune::Auspicious | Fortune::Lucky => cell.fg(Color::Green),
        Fortune::Ominous | Fortune::Unlucky => cell.fg(Color::Red),
        _ => cell,
    }
}

pub fn print_name_list(list: &[NameRecord]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Traditional"),
        Cell::new("Pinyin").fg(Color::Cyan),
        Cell::new("Strokes"),
        Cell::new("Elements"),
        Cell::new("Common"),
    ]);

    for rec in list {
        let strokes: Vec<String> = rec
            .traditional
            .given_name
            .strokes
            .iter()
            .map(u8::to_string)
            .collect();

        table.add_row(vec![
            Cell::new(rec.rank).set_alignment(CellAlignment::Right),
            Cell::new(&rec.simplified.full_name).add_attribute(Attribute::Bold),
            Cell::new(&rec.traditional.full_name),
            Cell::new(rec.pinyin_tone.join(" ")).fg(Color::Cyan),
            Cell::new(strokes.join("+")),
            Cell::new(elements(&rec.simplified.given_name)),
            Cell::new(if rec.is_common { "yes" } else { "" }),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_folkways(entries: &[FolkwayEntry]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Char").add_attribute(Attribute::Bold),
        Cell::new("Folkway"),
        Cell::new("Explanation"),
    ]);
    for e in entries {
        table.add_row(vec![
            Cell::new(e.unicode).add_attribute(Attribute::Bold),
            Cell::new(&e.text),
            Cell::new(&e.explanation),
        ]);
    }
    println!("\n{}", table);
}

fn nayin_cell(n: &Option<Nayin>) -> Cell {
    match n {
        Some(n) => Cell::new(format!("{} ({})", n.name, n.element.glyph())),
        None => Cell::new("-"),
    }
}

pub fn print_chart(chart: &ChartReport) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("").add_attribute(Attribute::Bold),
        Cell::new("Year"),
        Cell::new("Month"),
        Cell::new("Day"),
        Cell::new("Hour"),
    ]);

    let p = &chart.pillars;
    table.add_row(vec![
        Cell::new("Pillar").add_attribute(Attribute::Bold),
        Cell::new(p.year),
        Cell::new(p.month),
        Cell::new(p.day),
        Cell::new(p.hour),
    ]);

    let s = &chart.sound_five_elements;
    table.add_row(vec![
        Cell::new("Nayin").add_attribute(Attribute::Bold),
        nayin_cell(&s.year),
        nayin_cell(&s.month),
        nayin_cell(&s.day),
        nayin_cell(&s.hour),
    ]);
    println!("\n{}", table);

    let mut counts = new_table();
    counts.add_row(vec![
        Cell::new("").add_attribute(Attribute::Bold),
        Cell::new("木"),
        Cell::new("火"),
        Cell::new("土"),
        Cell::new("金"),
        Cell::new("水"),
    ]);

    let g = &chart.ganzhi_five_elements;
    for (label, c) in [
        ("Stems/Branches", &g.five_elements),
        ("Hidden", &g.five_elements_hidden),
        ("Total", &g.five_elements_total),
    ] {
        counts.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(c.wood),
            Cell::new(c.fire),
            Cell::new(c.earth),
            Cell::new(c.metal),
            Cell::new(c.water),
        ]);
    }
    println!("{}", counts);
    println!("Animal: {} {}", chart.animal.glyph(), chart.animal);
}

pub fn print_grid_report(name: &str, r: &GridReport) {
    println!("\nName: {}", name);
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Grid").add_attribute(Attribute::Bold),
        Cell::new("Value"),
        Cell::new("Fortune"),
    ]);

    let g = &r.grids;
    for (label, value, fortune) in [
        ("Heaven 天格", g.heaven, r.heaven),
        ("Human 人格", g.human, r.human),
        ("Earth 地格", g.earth, r.earth),
        ("Outer 外格", g.outer, r.outer),
        ("Total 总格", g.total, r.total),
    ] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value).set_alignment(CellAlignment::Right),
            fortune_cell(fortune),
        ]);
    }
    table.add_row(vec![
        Cell::new("Three Talents 三才"),
        Cell::new(g.talent_index()).set_alignment(CellAlignment::Right),
        fortune_cell(r.three_talents),
    ]);
    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new(r.rank)
            .fg(Color::Cyan)
            .set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    println!("{}", table);
}

pub fn print_rank_histogram(family: StrokePair, buckets: &RankBuckets, top: usize) {
    println!("\nFamily strokes: {}", family);
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Given pairs"),
        Cell::new("Sample"),
    ]);

    for (i, (rank, size)) in buckets.histogram().into_iter().enumerate() {
        let sample = if i < top {
            let pairs: Vec<String> = buckets.pairs(rank).take(8).map(|p| p.to_string()).collect();
            pairs.join(", ")
        } else {
            String::new()
        };
        table.add_row(vec![
            Cell::new(rank).set_alignment(CellAlignment::Right),
            Cell::new(size).set_alignment(CellAlignment::Right),
            Cell::new(sample),
        ]);
    }
    println!("{}", table);
    println!("Total given pairs: {}", buckets.total());
}
