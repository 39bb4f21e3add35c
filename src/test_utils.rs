//! 单元测试共用的小词典与 HMM 发射表

use std::collections::HashMap;

use crate::dict::PrefixDictionary;
use crate::segment::hmm::{EmissionTable, HmmModel, State};

pub const FIXTURE_DICT: &str = "\
今 50 t
今天 200 t
天 100 n
天天 5 d
氣 30 n
很 80 d
好 90 a
我 150 r
昨 3 tg
昨天 60 t
去 70 v
上 40 f
上海 50 ns
交 5 v
交通 40 n
大 60 a
學 20 v
與 30 p
老 25 a
師 10 ng
討 2 v
論 8 v
量 10 n
量子 12 n
子 30 ng
子力 1 n
力 20 n
这 100 r
一 200 m
一刹 1 m
一刹那 3 m
刹 2 n
刹那 4 m
的 300 uj
撙節 2 v
近 20 a
";

pub fn fixture_dictionary() -> PrefixDictionary {
    PrefixDictionary::parse(FIXTURE_DICT).unwrap()
}

pub fn fixture_emissions() -> EmissionTable {
    let mut emit = EmissionTable::default();
    let rows: [(State, &[(char, f64)]); 3] = [
        (State::B, &[('天', -2.0), ('大', -2.0), ('老', -2.0), ('討', -2.0), ('撙', -3.0)]),
        (State::E, &[('氣', -2.0), ('學', -2.0), ('師', -2.0), ('論', -2.0), ('近', -3.0)]),
        (State::S, &[('很', -2.0), ('好', -2.0), ('與', -2.0), ('我', -2.0)]),
    ];
    for (state, row) in rows {
        let table: HashMap<char, f64> = row.iter().copied().collect();
        emit.insert(state, table);
    }
    emit
}

pub fn fixture_hmm() -> HmmModel {
    HmmModel::with_emissions(fixture_emissions())
}
