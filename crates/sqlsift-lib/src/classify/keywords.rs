//! Keyword tables.

/// Operation-initiating keywords; any one of them is enough.
pub const STRONG: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER", "WITH", "SHOW", "DESCRIBE",
    "EXPLAIN",
];

/// Clauses, operators, constraints and common functions; two distinct ones are enough.
pub const BROAD: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER", "WITH", "FROM", "WHERE",
    "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "GROUP", "ORDER", "HAVING", "LIMIT", "OFFSET",
    "UNION", "INTERSECT", "EXCEPT", "GRANT", "REVOKE", "COMMIT", "ROLLBACK", "SAVEPOINT", "BEGIN",
    "END", "TRANSACTION", "INDEX", "VIEW", "TRIGGER", "PROCEDURE", "FUNCTION", "DECLARE", "CURSOR",
    "FETCH", "CLOSE", "OPEN", "EXEC", "EXECUTE", "CALL", "SHOW", "DESCRIBE", "DESC", "EXPLAIN",
    "USE", "DATABASE", "SCHEMA", "TABLE", "COLUMN", "CONSTRAINT", "PRIMARY", "FOREIGN", "KEY",
    "UNIQUE", "NOT", "NULL", "DEFAULT", "CHECK", "REFERENCES", "ON", "CASCADE", "RESTRICT", "SET",
    "INTO", "VALUES", "AS", "DISTINCT", "ALL", "ANY", "SOME", "EXISTS", "IN", "BETWEEN", "LIKE",
    "IS", "AND", "OR", "CASE", "WHEN", "THEN", "ELSE", "COUNT", "SUM", "AVG", "MIN", "MAX",
    "SUBSTRING", "LENGTH", "UPPER", "LOWER", "TRIM", "COALESCE", "ISNULL", "IFNULL",
];

/// Keywords whose misspellings count toward the typo-words rule.
pub const TYPO_KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER", "FROM", "WHERE", "JOIN",
    "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "GROUP", "ORDER", "HAVING", "LIMIT", "OFFSET",
    "UNION", "INTERSECT", "INTO", "VALUES", "SET", "TABLE", "INDEX", "VIEW", "DATABASE", "SCHEMA",
    "COLUMN", "CONSTRAINT", "PRIMARY", "FOREIGN", "KEY", "UNIQUE", "NOT", "NULL", "DEFAULT",
    "CHECK", "REFERENCES", "CASCADE", "RESTRICT", "BEGIN", "COMMIT", "ROLLBACK", "TRANSACTION",
    "EXPLAIN", "DESCRIBE", "SHOW", "USE", "GRANT", "REVOKE", "EXEC", "EXECUTE", "CALL",
    "PROCEDURE", "FUNCTION", "TRIGGER", "CURSOR", "FETCH", "CLOSE", "OPEN", "DECLARE", "CASE",
    "WHEN", "THEN", "ELSE", "END", "IF", "EXISTS", "IN", "BETWEEN", "LIKE", "IS", "AND", "OR", "AS",
    "DISTINCT", "ALL", "ANY", "SOME",
];

/// Primary keyword and the companions that usually follow it.
pub const CONTEXTS: &[(&str, &[&str])] = &[
    ("SELECT", &["FROM", "WHERE", "ORDER", "GROUP", "HAVING", "LIMIT"]),
    ("INSERT", &["INTO", "VALUES", "SELECT"]),
    ("UPDATE", &["SET", "WHERE"]),
    ("DELETE", &["FROM", "WHERE"]),
    ("CREATE", &["TABLE", "INDEX", "VIEW", "DATABASE"]),
    ("DROP", &["TABLE", "INDEX", "VIEW", "DATABASE"]),
    ("ALTER", &["TABLE", "ADD", "DROP", "MODIFY"]),
    ("WITH", &["SELECT", "AS"]),
    ("SHOW", &["TABLES", "DATABASES", "COLUMNS"]),
    ("DESCRIBE", &["TABLE"]),
    ("EXPLAIN", &["SELECT", "INSERT", "UPDATE", "DELETE"]),
];

/// Misspellings seen often enough to list explicitly.
pub const COMMON_MISSPELLINGS: &[(&str, &[&str])] = &[
    ("SELECT", &["SELCT", "SLECT", "CELECT", "GELECT", "SEELCT"]),
    ("FROM", &["FORM", "FRMO", "FRON", "FRIM"]),
    ("WHERE", &["WERE", "WHRE", "WHER", "HWERE"]),
    ("INSERT", &["INSERTT", "INSRT", "INSER", "INSERET"]),
    ("UPDATE", &["UPDAT", "UPDAET", "UPDTE", "UPADTE"]),
    ("DELETE", &["DELET", "DELTTE", "DELE", "DELTEE"]),
    ("CREATE", &["CREAT", "CRAETE", "CREAE", "CEREAT"]),
    ("TABLE", &["TABEL", "TABL", "TABLEE", "TBALE"]),
    ("VALUES", &["VALUE", "VALEUS", "VALES", "VAULES"]),
    ("ORDER", &["ODER", "ORER", "ORDEER", "ORDERR"]),
    ("GROUP", &["GRUP", "GROPU", "GRROUP", "GOUP"]),
    ("HAVING", &["HAVNG", "HAVNIG", "HAVIG", "HAVEING"]),
    ("LIMIT", &["LMIT", "LIMT", "LIMITT", "LIIMT"]),
    ("JOIN", &["JION", "JOINE", "JOIIN", "JOUN"]),
    ("INNER", &["INER", "INNR", "INEER", "INNAR"]),
    ("LEFT", &["LEGT", "LEFTT", "LAFT", "LEFY"]),
    ("RIGHT", &["RIGH", "RIGHTT", "RIHT", "ROGHT"]),
    ("UNION", &["UNIO", "UINON", "UNNION", "UION"]),
    ("INDEX", &["INDX", "IDEX", "INNDEX", "INDEKS"]),
    ("ALTER", &["ALTR", "ALEER", "ALTEER", "ALYER"]),
    ("DROP", &["DORP", "DROPP", "DEROP", "DRAP"]),
];

/// Adjacent keys on a QWERTY keyboard.
pub fn qwerty_neighbors(c: char) -> &'static [char] {
    match c {
        'Q' => &['W', 'A'],
        'W' => &['Q', 'E', 'S'],
        'E' => &['W', 'R', 'D'],
        'R' => &['E', 'T', 'F'],
        'T' => &['R', 'Y', 'G'],
        'Y' => &['T', 'U', 'H'],
        'U' => &['Y', 'I', 'J'],
        'I' => &['U', 'O', 'K'],
        'O' => &['I', 'P', 'L'],
        'P' => &['O', 'L'],
        'A' => &['Q', 'S', 'Z'],
        'S' => &['A', 'W', 'D', 'X'],
        'D' => &['S', 'E', 'F', 'C'],
        'F' => &['D', 'R', 'G', 'V'],
        'G' => &['F', 'T', 'H', 'B'],
        'H' => &['G', 'Y', 'J', 'N'],
        'J' => &['H', 'U', 'K', 'M'],
        'K' => &['J', 'I', 'L'],
        'L' => &['K', 'O', 'P'],
        'Z' => &['A', 'X'],
        'X' => &['Z', 'S', 'C'],
        'C' => &['X', 'D', 'V'],
        'V' => &['C', 'F', 'B'],
        'B' => &['V', 'G', 'N'],
        'N' => &['B', 'H', 'M'],
        'M' => &['N', 'J'],
        _ => &[],
    }
}

/// The Cyrillic letter on the same key of a ЙЦУКЕН keyboard.
pub fn russian_layout(c: char) -> Option<char> {
    let mapped = match c {
        'Q' => 'Й',
        'W' => 'Ц',
        'E' => 'У',
        'R' => 'К',
        'T' => 'Е',
        'Y' => 'Н',
        'U' => 'Г',
        'I' => 'Ш',
        'O' => 'Щ',
        'P' => 'З',
        'A' => 'Ф',
        'S' => 'Ы',
        'D' => 'В',
        'F' => 'А',
        'G' => 'П',
        'H' => 'Р',
        'J' => 'О',
        'K' => 'Л',
        'L' => 'Д',
        'Z' => 'Я',
        'X' => 'Ч',
        'C' => 'С',
        'V' => 'М',
        'B' => 'И',
        'N' => 'Т',
        'M' => 'Ь',
        _ => return None,
    };
    Some(mapped)
}
