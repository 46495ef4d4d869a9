use crate::types::Cost;

/// Best known tour lengths for the standard TSPLIB benchmarks. Used only
/// for gap reporting; the solvers never consult this table.
const OPTIMAL: &[(&str, Cost)] = &[
    ("berlin52", 7542.0),
    ("bier127", 118282.0),
    ("brd14051", 469385.0),
    ("ch130", 6110.0),
    ("ch150", 6528.0),
    ("d198", 15780.0),
    ("d493", 35002.0),
    ("d657", 48912.0),
    ("d1291", 50801.0),
    ("d1655", 62128.0),
    ("d2103", 80450.0),
    ("d15112", 1573084.0),
    ("eil51", 426.0),
    ("eil76", 538.0),
    ("eil101", 629.0),
    ("fl417", 11861.0),
    ("fl1400", 20127.0),
    ("fl1577", 22249.0),
    ("fl3795", 28772.0),
    ("fnl4461", 182566.0),
    ("gil262", 2378.0),
    ("kroA100", 21282.0),
    ("kroA150", 26524.0),
    ("kroA200", 29368.0),
    ("kroB100", 22141.0),
    ("kroB150", 26130.0),
    ("kroC100", 20749.0),
    ("kroD100", 21294.0),
    ("kroE100", 22068.0),
    ("lin105", 14379.0),
    ("lin318", 42029.0),
    ("nrw1379", 56638.0),
    ("p654", 34643.0),
    ("pcb442", 50778.0),
    ("pcb1173", 56892.0),
    ("pcb3038", 137694.0),
    ("pr76", 108159.0),
    ("pr107", 44303.0),
    ("pr124", 59030.0),
    ("pr136", 96772.0),
    ("pr144", 58537.0),
    ("pr152", 73682.0),
    ("pr226", 80369.0),
    ("pr264", 49135.0),
    ("pr299", 48191.0),
    ("pr439", 107217.0),
    ("pr1002", 259045.0),
    ("pr2392", 378032.0),
    ("rat99", 1211.0),
    ("rat195", 2323.0),
    ("rat575", 6773.0),
    ("rat783", 8806.0),
    ("rd100", 7910.0),
    ("rd400", 15281.0),
    ("rl1304", 252948.0),
    ("rl1323", 270199.0),
    ("rl1889", 316536.0),
    ("rl5915", 565530.0),
    ("rl5934", 556045.0),
    ("rl11849", 923288.0),
    ("st70", 675.0),
    ("ts225", 126643.0),
    ("tsp225", 3916.0),
    ("u159", 42080.0),
    ("u574", 36905.0),
    ("u724", 41910.0),
    ("u1060", 224094.0),
    ("u1432", 152970.0),
    ("u1817", 57201.0),
    ("u2152", 64253.0),
    ("u2319", 234256.0),
    ("vm1084", 239297.0),
    ("vm1748", 336556.0),
];

pub fn optimal_tour_length(name: &str) -> Option<Cost> {
    OPTIMAL
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, cost)| cost)
}
