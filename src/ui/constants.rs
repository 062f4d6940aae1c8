// ui/constants.rs

pub const ART: &str = r#"
                                                      .-.
           $        $             $                  ( $ )
      ___________________________________________    '-'
     |  MONTH 1  |  MONTH 2  |  MONTH 3  |  ...  |     |
     |___________|___________|___________|_______|     |
           \                                          /
            \______ cash ______ team ______ rep _____/
                        \         |        /
                         '--------+-------'
                                  |
                              [ RUNWAY ]
"#;

pub const TITLE: &str = r#" ____
|  _ \ _   _ _ ____      ____ _ _   _
| |_) | | | | '_ \ \ /\ / / _` | | | |
|  _ <| |_| | | | \ V  V / (_| | |_| |
|_| \_\\__,_|_| |_|\_/\_/ \__,_|\__, |
                                |___/
"#;

pub const TOTAL_MONTHS_HINT: &str = "Keep the company alive for twelve months.";
