use cfgtree_core::config::ParserConfig;
use cfgtree_core::{DataPath, Token, Tree};
use cfgtree_parser::{parse, ConfigParser, Dialect, IndentedParser, TerminatedParser};
use serde_json::json;

fn terminated(source: &str) -> Tree {
    parse(Dialect::Terminated, source, &ParserConfig::default()).unwrap()
}

fn indented(source: &str) -> Tree {
    parse(Dialect::Indented, source, &ParserConfig::default()).unwrap()
}

const SYSTEM: &str = r#"
exit all
configure
#--------------------------------------------------
echo "System Configuration"
#--------------------------------------------------
    system
        name "PE1"
        location "site 1"
        config-backup 5
        management-interface
            cli
                md-cli
                    no auto-config-save
                exit
            exit
        exit
        netconf
            no auto-config-save
            listen
                no shutdown
            exit
        exit
    exit
exit all
"#;

#[test]
fn test_terminated_dump_renders_in_source_order() {
    let expected = r#"configure
    system
        name PE1
        location "site 1"
        config-backup 5
        management-interface
            cli
                md-cli
                    no auto-config-save
        netconf
            no auto-config-save
            listen
                no shutdown"#;

    let mut parser = TerminatedParser::default();
    parser.parse_str(SYSTEM).unwrap();
    assert_eq!(parser.dumps(), expected);
    assert!(parser.is_complete());
}

#[test]
fn test_reopened_blocks_merge() {
    let tree = terminated(
        r#"
configure
    system
        field
        field 10
        container
            field
            field 2
        exit
        id_container 10
            x1_field
            x2_field 10
        exit
        field 11
    exit
    system
        field 20
        field 21
        container
            inner_field
        exit
        id_container 10
            y1_field
            y2_field 11
        exit
        id_container 20
            y1_field
            y2_field 11
        exit

    exit
exit all
"#,
    );

    let expected = r#"configure
    system
        field
        field 10
        container
            field
            field 2
            inner_field
        "id_container 10"
            x1_field
            x2_field 10
            y1_field
            y2_field 11
        field 11
        field 20
        field 21
        "id_container 20"
            y1_field
            y2_field 11"#;
    assert_eq!(tree.to_text(), expected);
    assert_eq!(tree.roots()[0].children().len(), 1);
}

#[test]
fn test_services() {
    let tree = terminated(
        r#"
configure
    service
        customer 1 name "1" create
            description "Default customer"
        exit
        sdp 10 mpls create
            far-end 10.0.0.2
            no shutdown
        exit
        vpls 100 name "100" customer 1 create
            stp
                shutdown
            exit
            no shutdown
        exit
        epipe 200 name "200" customer 1 create
            shutdown
        exit
    exit
    router Base
        bfd 100 receive 100 multiplier 3 type cpm-np
    exit
exit all
"#,
    );

    assert_eq!(
        tree.to_nested_map(),
        json!({
            "configure": {
                "service": {
                    "customer 1": {"name": "1", "description": "Default customer"},
                    "sdp 10": {"delivery-type": "mpls", "far-end": "10.0.0.2", "shutdown": "no"},
                    "vpls 100": {
                        "name": "100",
                        "customer": "1",
                        "stp": {"shutdown": "yes"},
                        "shutdown": "no"
                    },
                    "epipe 200": {"name": "200", "customer": "1", "shutdown": "yes"}
                },
                "router Base": {
                    "bfd": {"transmit": "100", "receive": "100", "multiplier": "3", "type": "cpm-np"}
                }
            }
        })
    );
}

#[test]
fn test_negation_keeps_last_directive() {
    let tree = terminated(
        "\
configure
    port 1/1/1
        shutdown
        no shutdown
    exit
    port 1/1/1
        shutdown
    exit
exit all
",
    );
    assert_eq!(
        tree.to_nested_map(),
        json!({"configure": {"port 1/1/1": {"shutdown": "yes"}}})
    );
}

#[test]
fn test_query_router_interfaces() {
    let tree = terminated(
        r#"
configure
    router Base
        interface "system"
            address 10.0.0.1/32
        exit
        interface "to_p1_100g_1"
            address 10.1.0.1/31
        exit
    exit
exit all
"#,
    );
    let found: Vec<String> = tree
        .query(&"/configure/router/interface".parse().unwrap())
        .into_iter()
        .map(Token::identity)
        .collect();
    assert_eq!(found, ["interface system", "interface to_p1_100g_1"]);

    let quoted: DataPath = r#"configure/"router base"/"interface to""#.parse().unwrap();
    assert_eq!(tree.query(&quoted).len(), 1);
}

#[test]
fn test_every_enumerated_path_resolves() {
    let tree = terminated(SYSTEM);
    let paths: Vec<DataPath> = tree.enumerate_paths().collect();
    assert_eq!(paths.len(), 13);
    for path in &paths {
        let found = tree.query(path);
        assert!(!found.is_empty(), "{} did not resolve", path);
    }
}

#[test]
fn test_indented_sections() {
    let tree = indented(
        "
redundancy
 mode sso
 interchassis group 1
  monitor
   member ip 10.147.47.1
 interchassis group 2
  monitor peer bfd

redundancy mode
redundancy interchassis group
bridge-domain 10
bridge-domain 11
",
    );

    assert_eq!(
        tree.to_nested_map(),
        json!({
            "redundancy": {
                "mode": "sso",
                "interchassis": {
                    "group": {
                        "1": {"monitor": {"member": {"ip": "10.147.47.1"}}},
                        "2": {"monitor": {"peer": "bfd"}}
                    }
                }
            },
            "bridge-domain": {"10": "", "11": ""}
        })
    );
}

#[test]
fn test_indented_banner_and_lines() {
    let tree = indented(
        "
!
!
control-plane
!
banner login ^CCCCCCCC
####################################################################################
You are about to log on to a proprietary computer system where access
is provided, by the Owner of the computer system, only to authorised
users. If you are not authorised to use this system, please refrain
from doing so. All activities on this system are being monitored.
Unauthorized  access to this system may be subjected to legal action
and/or prosecution.
####################################################################################
^C
banner motd ^CC^C
!
line con 0
 session-timeout 10
 exec-timeout 5 0
 logging synchronous
 exec prompt timestamp
 transport output ssh
 stopbits 1
line aux 0
 stopbits 1
line vty 0 4
 session-timeout 60
 exec-timeout 60 0
 logging synchronous
 exec prompt timestamp
 transport input telnet ssh
 transport output telnet ssh
!
ntp source Loopback20
ntp server vrf OAM 10.144.80.129 prefer
ntp server vrf OAM 10.144.80.130
!
",
    );

    let login = "^CCCCCCCC\n\
####################################################################################\n\
You are about to log on to a proprietary computer system where access\n\
is provided, by the Owner of the computer system, only to authorised\n\
users. If you are not authorised to use this system, please refrain\n\
from doing so. All activities on this system are being monitored.\n\
Unauthorized access to this system may be subjected to legal action\n\
and/or prosecution.\n\
####################################################################################\n\
^C";

    assert_eq!(
        tree.to_nested_map(),
        json!({
            "control-plane": "",
            "banner": {"login": login, "motd": "^CC^C"},
            "line": {
                "con": {
                    "0": {
                        "session-timeout": "10",
                        "exec-timeout": {"5": "0"},
                        "logging": "synchronous",
                        "exec": {"prompt": "timestamp"},
                        "transport": {"output": "ssh"},
                        "stopbits": "1"
                    }
                },
                "aux": {"0": {"stopbits": "1"}},
                "vty": {
                    "0": {
                        "4": {
                            "session-timeout": "60",
                            "exec-timeout": {"60": "0"},
                            "logging": "synchronous",
                            "exec": {"prompt": "timestamp"},
                            "transport": {
                                "input": {"telnet": "ssh"},
                                "output": {"telnet": "ssh"}
                            }
                        }
                    }
                }
            },
            "ntp": {
                "source": "Loopback20",
                "server": {"vrf": {"OAM": {"10.144.80.129": "prefer", "10.144.80.130": ""}}}
            }
        })
    );
    assert!(tree.is_complete());
}

#[test]
fn test_indented_usernames() {
    let tree = indented(
        "
username nsn password 7 12312312312312
username sudheer privilege 15 secret 5 a12384798987987cxvzxc9v87
username anil privilege 15 secret 5 $0982asdfasldfkjdli$
",
    );

    assert_eq!(
        tree.to_nested_map(),
        json!({
            "username": {
                "nsn": {"password": {"type": "7", "value": "12312312312312"}},
                "sudheer": {
                    "privilege": {
                        "type": "15",
                        "secret": {"type": "5", "value": "a12384798987987cxvzxc9v87"}
                    }
                },
                "anil": {
                    "privilege": {
                        "type": "15",
                        "secret": {"type": "5", "value": "$0982asdfasldfkjdli$"}
                    }
                }
            }
        })
    );
}

#[test]
fn test_indented_text_round_trip() {
    let sources = [
        "\
hostname R1
interface GigabitEthernet0/0/0
 description uplink to core
 ip address 10.0.0.1 255.255.255.0
 no shutdown
interface GigabitEthernet0/0/1
 shutdown
",
        "\
router bgp 65000
  neighbor 10.0.0.2 remote-as 65001
  address-family ipv4
    neighbor 10.0.0.2 activate
username ops privilege 15 secret 5 $1$abc
",
    ];

    for source in sources {
        let first = indented(source);
        let second = indented(&first.to_text());
        assert_eq!(second.to_nested_map(), first.to_nested_map(), "{}", first.to_text());
    }
}

#[test]
fn test_terminated_text_reparses_as_indented() {
    let sources = [
        SYSTEM,
        r#"
configure
    system
        name "PE1"
        location "site 1"
    exit
    router Base
        interface "system"
            address 10.0.0.1/32
            shutdown
        exit
        interface "to_p1_100g_1"
            address 10.1.0.1/31
            no shutdown
        exit
    exit
    service
        vpls 100 name "100" customer 1 create
            description "Default vpls"
        exit
    exit
exit all
"#,
    ];

    for source in sources {
        let first = terminated(source);
        let second = indented(&first.to_text());
        assert_eq!(second.to_nested_map(), first.to_nested_map(), "{}", first.to_text());
    }
}

#[test]
fn test_indented_running_config_header_skipped() {
    let tree = indented(
        "\
Building configuration...

Current configuration : 5443 bytes
!
! Last configuration change at 10:21:13 UTC Mon Mar 1 2021
!
version 16.9
service timestamps debug datetime msec
hostname R1
!
end
",
    );
    assert_eq!(
        tree.to_nested_map(),
        json!({
            "version": "16.9",
            "service": {"timestamps": {"debug": {"datetime": "msec"}}},
            "hostname": "R1"
        })
    );
}

#[test]
fn test_detect_and_dispatch() {
    let config = ParserConfig::default();
    for source in [SYSTEM, "!\nhostname R1\n!\nend\n"] {
        let dialect = Dialect::detect(source).unwrap();
        let mut parser = dialect.parser(&config);
        parser.parse_str(source).unwrap();
        assert!(!parser.get_paths().is_empty());
    }

    let mut parser = IndentedParser::default();
    parser.parse_str("hostname R1\n").unwrap();
    assert_eq!(parser.query(&"/host".parse().unwrap()), vec![json!({"hostname": "R1"})]);
}
