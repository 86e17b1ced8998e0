//! Shared test documents

/// Sample file from the GEDCOM article on Wikipedia
pub(crate) const WIKIPEDIA_SAMPLE: &str = "0 HEAD
1 SOUR Reunion
2 VERS V8.0
2 CORP Leister Productions
1 DEST Reunion
1 DATE 11 FEB 2006
1 FILE test
1 GEDC
2 VERS 5.5
1 CHAR MACINTOSH
0 @I1@ INDI
1 NAME Robert /Cox/
1 NAME Bob /Cox/
2 TYPE aka
1 NAME
2 GIVN Rob
2 SURN Cox
2 TYPE aka
1 SEX M
1 FAMS @F1@
1 CHAN
2 DATE 11 FEB 2006
0 @I2@ INDI
1 NAME Joann /Para/
1 SEX F
1 FAMS @F1@
1 CHAN
2 DATE 11 FEB 2006
0 @I3@ INDI
1 NAME Bobby Jo /Cox/
1 SEX M
1 FAMC @F1@
1 CHAN
2 DATE 11 FEB 2006
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 MARR
1 CHIL @I3@
0 TRLR
";

/// Four generations plus one unrelated person
///
/// ```text
/// Gus (I7) + Hilda (I8)
///     └── Alan (I1) + Beth (I2)
///             ├── Carl (I3) + Erin (I5)
///             │       └── Finn (I6)
///             └── Dana (I4)
/// Ivan (I9)
/// ```
pub(crate) const FAMILY_TREE: &str = "0 HEAD
0 @I1@ INDI
1 NAME Alan /Archer/
1 SEX M
1 FAMC @F0@
1 FAMS @F1@
0 @I2@ INDI
1 NAME Beth /Baker/
1 SEX F
1 FAMS @F1@
0 @I3@ INDI
1 NAME Carl /Archer/
1 SEX M
1 FAMC @F1@
1 FAMS @F2@
0 @I4@ INDI
1 NAME Dana /Archer/
1 SEX F
1 FAMC @F1@
0 @I5@ INDI
1 NAME Erin /Evans/
1 SEX F
1 FAMS @F2@
0 @I6@ INDI
1 NAME Finn /Archer/
1 SEX M
1 FAMC @F2@
0 @I7@ INDI
1 NAME Gus /Archer/
1 SEX M
1 FAMS @F0@
0 @I8@ INDI
1 NAME Hilda /Hart/
1 SEX F
1 FAMS @F0@
0 @I9@ INDI
1 NAME Ivan /Irwin/
1 SEX M
0 @F0@ FAM
1 HUSB @I7@
1 WIFE @I8@
1 CHIL @I1@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 CHIL @I4@
0 @F2@ FAM
1 HUSB @I3@
1 WIFE @I5@
1 CHIL @I6@
0 TRLR
";

/// A person recorded as their own father
pub(crate) const CYCLIC_TREE: &str = "0 HEAD
0 @I1@ INDI
1 SEX M
1 FAMC @F1@
1 FAMS @F1@
0 @I2@ INDI
1 SEX F
0 @F1@ FAM
1 HUSB @I1@
1 CHIL @I1@
0 TRLR
";
