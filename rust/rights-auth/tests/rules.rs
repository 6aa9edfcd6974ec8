//! Rules on grants, and how file-scoped rules combine with object rights.

use pretty_assertions::assert_eq;
use rights_auth::RightsAuth;
use testresult::TestResult;

/// Object world read, plus a file block whose grants are given by
/// `file_blocks`, placed in a second `rightsMetadata` element.
fn with_file_blocks(file_blocks: &str) -> String {
    format!(
        r#"<objectType>
             <rightsMetadata>
               <access type="read"><machine><world/></machine></access>
             </rightsMetadata>
             <rightsMetadata>{file_blocks}</rightsMetadata>
           </objectType>"#
    )
}

/// Every way of writing "stanford full access, world no-download" for the
/// given files must read the same.
fn assert_stanford_full_world_no_download(rights: &RightsAuth, files: &[&str]) {
    for file in files {
        assert_eq!(rights.world_rights_for_file(file), (true, Some("no-download")));
        assert_eq!(rights.stanford_only_rights_for_file(file), (true, None));
    }
    assert_eq!(rights.world_rights_for_file("object.doc"), (true, None));
    assert_eq!(rights.stanford_only_rights_for_file("object.doc"), (false, None));
}

#[test_log::test]
fn it_returns_the_object_world_rule() -> TestResult {
    let rights = RightsAuth::parse(
        r#"<objectType><rightsMetadata>
             <access type="read"><machine><world rule="no-download"/></machine></access>
           </rightsMetadata></objectType>"#,
    )?;
    assert_eq!(rights.world_rights(), (true, Some("no-download")));
    assert!(!rights.world_unrestricted());
    assert!(!rights.world_downloadable());
    Ok(())
}

#[test_log::test]
fn it_returns_the_object_stanford_rule() -> TestResult {
    let rights = RightsAuth::parse(
        r#"<objectType><rightsMetadata>
             <access type="read">
               <machine><group rule="no-download">stanford</group></machine>
             </access>
           </rightsMetadata></objectType>"#,
    )?;
    assert_eq!(rights.stanford_only_rights(), (true, Some("no-download")));
    assert!(!rights.stanford_only_unrestricted());
    assert!(!rights.stanford_only_downloadable());
    Ok(())
}

#[test_log::test]
fn it_keeps_stanford_unrestricted_beside_a_qualified_world() -> TestResult {
    let rights = RightsAuth::parse(
        r#"<objectType><rightsMetadata>
             <access type="read">
               <machine>
                 <group>stanford</group>
                 <world rule="no-download"/>
               </machine>
             </access>
           </rightsMetadata></objectType>"#,
    )?;
    assert_eq!(rights.stanford_only_rights(), (true, None));
    assert!(rights.stanford_only_unrestricted());
    assert_eq!(rights.world_rights(), (true, Some("no-download")));
    assert!(!rights.world_unrestricted());
    assert!(rights.readable());
    Ok(())
}

#[test_log::test]
fn it_keeps_rules_other_than_no_download_downloadable() -> TestResult {
    let rights = RightsAuth::parse(
        r#"<rightsMetadata>
             <access type="read">
               <machine>
                 <world rule="foobar"/>
                 <group rule="foobar">stanford</group>
               </machine>
             </access>
           </rightsMetadata>"#,
    )?;
    assert!(rights.world_downloadable());
    assert!(rights.stanford_only_downloadable());
    assert!(!rights.world_unrestricted());
    assert!(!rights.stanford_only_unrestricted());
    Ok(())
}

#[test_log::test]
fn it_reads_a_single_file_with_one_machine() -> TestResult {
    let rights = RightsAuth::parse(&with_file_blocks(
        r#"<access type="read">
             <file>interview.doc</file>
             <machine>
               <group>stanford</group>
               <world rule="no-download"/>
             </machine>
           </access>"#,
    ))?;
    assert_stanford_full_world_no_download(&rights, &["interview.doc"]);
    Ok(())
}

#[test_log::test]
fn it_reads_several_files_in_one_block() -> TestResult {
    let rights = RightsAuth::parse(&with_file_blocks(
        r#"<access type="read">
             <file>file1.txt</file>
             <file>file2.txt</file>
             <machine>
               <group>stanford</group>
               <world rule="no-download"/>
             </machine>
           </access>"#,
    ))?;
    assert_stanford_full_world_no_download(&rights, &["file1.txt", "file2.txt"]);
    Ok(())
}

#[test_log::test]
fn it_reads_each_file_in_its_own_block() -> TestResult {
    let block = |file: &str| {
        format!(
            r#"<access type="read">
                 <file>{file}</file>
                 <machine>
                   <group>stanford</group>
                   <world rule="no-download"/>
                 </machine>
               </access>"#
        )
    };
    let rights = RightsAuth::parse(&with_file_blocks(&format!(
        "{}{}",
        block("file1.txt"),
        block("file2.txt")
    )))?;
    assert_stanford_full_world_no_download(&rights, &["file1.txt", "file2.txt"]);
    Ok(())
}

#[test_log::test]
fn it_pools_split_machines_for_a_file() -> TestResult {
    let rights = RightsAuth::parse(&with_file_blocks(
        r#"<access type="read">
             <file>interview.doc</file>
             <machine><group>stanford</group></machine>
             <machine><world rule="no-download"/></machine>
           </access>"#,
    ))?;
    assert_stanford_full_world_no_download(&rights, &["interview.doc"]);
    Ok(())
}

#[test_log::test]
fn it_pools_split_machines_for_several_files() -> TestResult {
    let rights = RightsAuth::parse(&with_file_blocks(
        r#"<access type="read">
             <file>file1.txt</file>
             <file>file2.txt</file>
             <machine><group>stanford</group></machine>
             <machine><world rule="no-download"/></machine>
           </access>
           <access type="read">
             <file>file3.txt</file>
             <machine><group>stanford</group></machine>
             <machine><world rule="no-download"/></machine>
           </access>"#,
    ))?;
    assert_stanford_full_world_no_download(&rights, &["file1.txt", "file2.txt", "file3.txt"]);
    Ok(())
}

#[test_log::test]
fn it_returns_agent_rights_for_files() -> TestResult {
    let rights = RightsAuth::parse(
        r#"<objectType>
             <rightsMetadata>
               <access type="read">
                 <machine>
                   <world/>
                   <agent rule="objlevel">adminapp</agent>
                 </machine>
               </access>
             </rightsMetadata>
             <rightsMetadata>
               <access type="read">
                 <file>interview.doc</file>
                 <machine>
                   <group>stanford</group>
                   <world rule="no-download"/>
                   <agent>someapp1</agent>
                   <agent rule="somerule">someapp2</agent>
                 </machine>
               </access>
             </rightsMetadata>
           </objectType>"#,
    )?;

    assert_eq!(rights.agent_rights_for_file("interview.doc", "someapp1"), (true, None));
    assert!(rights.agent_unrestricted_for_file("interview.doc", "someapp1"));
    assert_eq!(
        rights.agent_rights_for_file("interview.doc", "someapp2"),
        (true, Some("somerule"))
    );
    assert!(!rights.agent_unrestricted_for_file("interview.doc", "someapp2"));
    assert_eq!(
        rights.agent_rights_for_file("interview.doc", "unauthorized-app"),
        (false, None)
    );

    assert_eq!(
        rights.agent_rights_for_file("freetosee.doc", "adminapp"),
        (true, Some("objlevel"))
    );
    assert_eq!(rights.agent_rights_for_file("freetosee.doc", "someapp2"), (false, None));
    Ok(())
}
